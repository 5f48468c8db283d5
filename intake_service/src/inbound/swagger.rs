use crate::domain::reports::{CountEntry, ReportSummary};
use crate::domain::service::NextCaseNumber;
use crate::inbound::http::{
    self, BeneficiaryResponse, DeleteResponse, HealthResponse, ListBeneficiariesResponse,
    NextCaseNumberResponse, ReportsResponse,
};
use models_intake::api::BeneficiaryInput;
use models_intake::{Beneficiary, EmotionEntry, EmotionPalette, ParsedEmotion};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        http::health_handler,
        http::list_beneficiaries_handler,
        http::create_beneficiary_handler,
        http::get_beneficiary_handler,
        http::update_beneficiary_handler,
        http::delete_beneficiary_handler,
        http::next_case_number_handler,
        http::report_summary_handler,
    ),
    components(
        schemas(
            Beneficiary,
            BeneficiaryInput,
            EmotionEntry, EmotionPalette, ParsedEmotion,
            CountEntry, ReportSummary,
            HealthResponse,
            ListBeneficiariesResponse, BeneficiaryResponse,
            DeleteResponse, NextCaseNumberResponse, ReportsResponse,
            NextCaseNumber,
        ),
    ),
    tags(
        (name = "intake service", description = "Beneficiary intake service")
    )
)]
pub struct ApiDoc;
