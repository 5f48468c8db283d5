//! Beneficiary record model (storage representation).
//!
//! Field names mirror the `beneficiarios` table columns. [`Beneficiary`] is
//! the fully decoded record handed to callers; [`BeneficiaryDraft`] is the
//! insert shape produced by the field normalizer; [`BeneficiaryPatch`] is the
//! partial-update shape where an outer `None` means "leave the stored value
//! alone".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::emotions::{EmotionEntry, ParsedEmotion};

/// One questionnaire submission, fully decoded.
///
/// Tag-set fields are always arrays at this point; heterogeneous stored
/// shapes are resolved at the persistence boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Beneficiary {
    pub id: String,
    pub created_at: DateTime<Utc>,

    // ===== Contact metadata =====
    pub fecha: Option<String>,
    pub hora: Option<String>,
    pub caso_numero: Option<i64>,
    pub forma_contacto: Option<String>,
    pub tipo_contacto: Option<String>,
    pub lugar_contacto: Option<String>,

    // ===== Locality =====
    pub localidad: Option<String>,
    pub barrio: Option<String>,

    // ===== Source of information (used when not self-reported) =====
    pub mismo_beneficiario: Option<String>,
    pub fuente_nombre: Option<String>,
    pub fuente_vinculo: Option<String>,
    pub fuente_telefono: Option<String>,

    // ===== Personal =====
    pub nombre_apellido: Option<String>,
    pub fecha_nacimiento: Option<String>,
    pub genero: Option<String>,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
    pub grupo_etnico: Option<String>,
    pub poblaciones_especiales: Vec<String>,

    // ===== Family =====
    pub estado_civil: Option<String>,
    pub numero_hijos: Option<String>,
    pub convive_con: Option<String>,

    // ===== Social support =====
    pub apoyo_social_personas: Option<f64>,
    pub apoyo_social_interes: Option<f64>,
    pub apoyo_social_vecinos: Option<f64>,
    pub apoyo_social_puntaje: Option<f64>,
    pub apoyo_social_nivel: Option<String>,

    // ===== Education / occupation =====
    pub escolaridad: Option<String>,
    pub usa_computador: Option<String>,
    pub ocupacion: Option<String>,

    // ===== Wellbeing =====
    pub alimentacion: Option<String>,
    pub practica_deporte: Option<String>,
    pub cual_deporte: Option<String>,
    pub participacion_comunitaria: Option<String>,
    pub ha_participado: Option<String>,

    // ===== Present situations =====
    pub situaciones_salud: Vec<String>,
    pub situaciones_consumo: Vec<String>,
    pub situaciones_entorno: Vec<String>,
    pub situaciones_economicas: Vec<String>,
    pub situaciones_legales: Vec<String>,

    // ===== Requested support =====
    pub peticiones_apoyo: Vec<String>,
    pub peticiones_necesidades: Vec<String>,
    pub peticiones_capacitacion: Vec<String>,
    pub peticiones_asesoria: Vec<String>,

    // ===== Case =====
    pub descripcion_caso: Option<String>,
    pub nombre_diligencia: Option<String>,
    pub rol_diligencia: Option<String>,
    pub telefono_diligencia: Option<String>,

    pub emociones: Vec<EmotionEntry>,
}

impl Beneficiary {
    /// Build a stored record from an insert draft plus generated identity.
    pub fn from_draft(id: String, created_at: DateTime<Utc>, draft: BeneficiaryDraft) -> Self {
        Beneficiary {
            id,
            created_at,
            fecha: draft.fecha,
            hora: draft.hora,
            caso_numero: draft.caso_numero,
            forma_contacto: draft.forma_contacto,
            tipo_contacto: draft.tipo_contacto,
            lugar_contacto: draft.lugar_contacto,
            localidad: draft.localidad,
            barrio: draft.barrio,
            mismo_beneficiario: draft.mismo_beneficiario,
            fuente_nombre: draft.fuente_nombre,
            fuente_vinculo: draft.fuente_vinculo,
            fuente_telefono: draft.fuente_telefono,
            nombre_apellido: draft.nombre_apellido,
            fecha_nacimiento: draft.fecha_nacimiento,
            genero: draft.genero,
            direccion: draft.direccion,
            telefono: draft.telefono,
            grupo_etnico: draft.grupo_etnico,
            poblaciones_especiales: draft.poblaciones_especiales,
            estado_civil: draft.estado_civil,
            numero_hijos: draft.numero_hijos,
            convive_con: draft.convive_con,
            apoyo_social_personas: draft.apoyo_social_personas,
            apoyo_social_interes: draft.apoyo_social_interes,
            apoyo_social_vecinos: draft.apoyo_social_vecinos,
            apoyo_social_puntaje: draft.apoyo_social_puntaje,
            apoyo_social_nivel: draft.apoyo_social_nivel,
            escolaridad: draft.escolaridad,
            usa_computador: draft.usa_computador,
            ocupacion: draft.ocupacion,
            alimentacion: draft.alimentacion,
            practica_deporte: draft.practica_deporte,
            cual_deporte: draft.cual_deporte,
            participacion_comunitaria: draft.participacion_comunitaria,
            ha_participado: draft.ha_participado,
            situaciones_salud: draft.situaciones_salud,
            situaciones_consumo: draft.situaciones_consumo,
            situaciones_entorno: draft.situaciones_entorno,
            situaciones_economicas: draft.situaciones_economicas,
            situaciones_legales: draft.situaciones_legales,
            peticiones_apoyo: draft.peticiones_apoyo,
            peticiones_necesidades: draft.peticiones_necesidades,
            peticiones_capacitacion: draft.peticiones_capacitacion,
            peticiones_asesoria: draft.peticiones_asesoria,
            descripcion_caso: draft.descripcion_caso,
            nombre_diligencia: draft.nombre_diligencia,
            rol_diligencia: draft.rol_diligencia,
            telefono_diligencia: draft.telefono_diligencia,
            emociones: draft.emociones,
        }
    }

    /// Emotions resolved into display labels and palettes.
    pub fn parsed_emotions(&self) -> Vec<ParsedEmotion> {
        self.emociones
            .iter()
            .filter_map(EmotionEntry::display)
            .collect()
    }
}

/// Storage-shaped insert payload. Arrays are always present (possibly
/// empty), absent scalars are NULL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeneficiaryDraft {
    pub fecha: Option<String>,
    pub hora: Option<String>,
    pub caso_numero: Option<i64>,
    pub forma_contacto: Option<String>,
    pub tipo_contacto: Option<String>,
    pub lugar_contacto: Option<String>,
    pub localidad: Option<String>,
    pub barrio: Option<String>,
    pub mismo_beneficiario: Option<String>,
    pub fuente_nombre: Option<String>,
    pub fuente_vinculo: Option<String>,
    pub fuente_telefono: Option<String>,
    pub nombre_apellido: Option<String>,
    pub fecha_nacimiento: Option<String>,
    pub genero: Option<String>,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
    pub grupo_etnico: Option<String>,
    pub poblaciones_especiales: Vec<String>,
    pub estado_civil: Option<String>,
    pub numero_hijos: Option<String>,
    pub convive_con: Option<String>,
    pub apoyo_social_personas: Option<f64>,
    pub apoyo_social_interes: Option<f64>,
    pub apoyo_social_vecinos: Option<f64>,
    pub apoyo_social_puntaje: Option<f64>,
    pub apoyo_social_nivel: Option<String>,
    pub escolaridad: Option<String>,
    pub usa_computador: Option<String>,
    pub ocupacion: Option<String>,
    pub alimentacion: Option<String>,
    pub practica_deporte: Option<String>,
    pub cual_deporte: Option<String>,
    pub participacion_comunitaria: Option<String>,
    pub ha_participado: Option<String>,
    pub situaciones_salud: Vec<String>,
    pub situaciones_consumo: Vec<String>,
    pub situaciones_entorno: Vec<String>,
    pub situaciones_economicas: Vec<String>,
    pub situaciones_legales: Vec<String>,
    pub peticiones_apoyo: Vec<String>,
    pub peticiones_necesidades: Vec<String>,
    pub peticiones_capacitacion: Vec<String>,
    pub peticiones_asesoria: Vec<String>,
    pub descripcion_caso: Option<String>,
    pub nombre_diligencia: Option<String>,
    pub rol_diligencia: Option<String>,
    pub telefono_diligencia: Option<String>,
    pub emociones: Vec<EmotionEntry>,
}

/// Partial-update payload. Outer `None` = field absent from the request,
/// leave stored value unchanged. `Some(None)` = set NULL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeneficiaryPatch {
    pub fecha: Option<Option<String>>,
    pub hora: Option<Option<String>>,
    pub caso_numero: Option<Option<i64>>,
    pub forma_contacto: Option<Option<String>>,
    pub tipo_contacto: Option<Option<String>>,
    pub lugar_contacto: Option<Option<String>>,
    pub localidad: Option<Option<String>>,
    pub barrio: Option<Option<String>>,
    pub mismo_beneficiario: Option<Option<String>>,
    pub fuente_nombre: Option<Option<String>>,
    pub fuente_vinculo: Option<Option<String>>,
    pub fuente_telefono: Option<Option<String>>,
    pub nombre_apellido: Option<Option<String>>,
    pub fecha_nacimiento: Option<Option<String>>,
    pub genero: Option<Option<String>>,
    pub direccion: Option<Option<String>>,
    pub telefono: Option<Option<String>>,
    pub grupo_etnico: Option<Option<String>>,
    pub poblaciones_especiales: Option<Vec<String>>,
    pub estado_civil: Option<Option<String>>,
    pub numero_hijos: Option<Option<String>>,
    pub convive_con: Option<Option<String>>,
    pub apoyo_social_personas: Option<Option<f64>>,
    pub apoyo_social_interes: Option<Option<f64>>,
    pub apoyo_social_vecinos: Option<Option<f64>>,
    pub apoyo_social_puntaje: Option<Option<f64>>,
    pub apoyo_social_nivel: Option<Option<String>>,
    pub escolaridad: Option<Option<String>>,
    pub usa_computador: Option<Option<String>>,
    pub ocupacion: Option<Option<String>>,
    pub alimentacion: Option<Option<String>>,
    pub practica_deporte: Option<Option<String>>,
    pub cual_deporte: Option<Option<String>>,
    pub participacion_comunitaria: Option<Option<String>>,
    pub ha_participado: Option<Option<String>>,
    pub situaciones_salud: Option<Vec<String>>,
    pub situaciones_consumo: Option<Vec<String>>,
    pub situaciones_entorno: Option<Vec<String>>,
    pub situaciones_economicas: Option<Vec<String>>,
    pub situaciones_legales: Option<Vec<String>>,
    pub peticiones_apoyo: Option<Vec<String>>,
    pub peticiones_necesidades: Option<Vec<String>>,
    pub peticiones_capacitacion: Option<Vec<String>>,
    pub peticiones_asesoria: Option<Vec<String>>,
    pub descripcion_caso: Option<Option<String>>,
    pub nombre_diligencia: Option<Option<String>>,
    pub rol_diligencia: Option<Option<String>>,
    pub telefono_diligencia: Option<Option<String>>,
    pub emociones: Option<Vec<EmotionEntry>>,
}

impl BeneficiaryPatch {
    /// A patch with no fields set. Applying it changes nothing, and the
    /// gateway treats it as a read.
    pub fn is_empty(&self) -> bool {
        *self == BeneficiaryPatch::default()
    }

    /// Merge this patch into a stored record, defining the PATCH semantics
    /// once for every backend that cannot express them in a single
    /// statement.
    pub fn apply(&self, record: &mut Beneficiary) {
        macro_rules! merge {
            ($($field:ident),+ $(,)?) => {
                $(if let Some(value) = &self.$field {
                    record.$field = value.clone();
                })+
            };
        }
        merge!(
            fecha,
            hora,
            caso_numero,
            forma_contacto,
            tipo_contacto,
            lugar_contacto,
            localidad,
            barrio,
            mismo_beneficiario,
            fuente_nombre,
            fuente_vinculo,
            fuente_telefono,
            nombre_apellido,
            fecha_nacimiento,
            genero,
            direccion,
            telefono,
            grupo_etnico,
            poblaciones_especiales,
            estado_civil,
            numero_hijos,
            convive_con,
            apoyo_social_personas,
            apoyo_social_interes,
            apoyo_social_vecinos,
            apoyo_social_puntaje,
            apoyo_social_nivel,
            escolaridad,
            usa_computador,
            ocupacion,
            alimentacion,
            practica_deporte,
            cual_deporte,
            participacion_comunitaria,
            ha_participado,
            situaciones_salud,
            situaciones_consumo,
            situaciones_entorno,
            situaciones_economicas,
            situaciones_legales,
            peticiones_apoyo,
            peticiones_necesidades,
            peticiones_capacitacion,
            peticiones_asesoria,
            descripcion_caso,
            nombre_diligencia,
            rol_diligencia,
            telefono_diligencia,
            emociones,
        );
    }
}
