//! Postgres-backed beneficiary store.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::error::Result;
use crate::domain::ports::BeneficiaryStore;
use models_intake::db::BeneficiaryRow;
use models_intake::{Beneficiary, BeneficiaryDraft, BeneficiaryPatch};

const INSERT_SQL: &str = "\
INSERT INTO beneficiarios (\
 id, created_at, fecha, hora, caso_numero, forma_contacto, tipo_contacto,\
 lugar_contacto, localidad, barrio, mismo_beneficiario, fuente_nombre,\
 fuente_vinculo, fuente_telefono, nombre_apellido, fecha_nacimiento, genero,\
 direccion, telefono, grupo_etnico, poblaciones_especiales, estado_civil,\
 numero_hijos, convive_con, apoyo_social_personas, apoyo_social_interes,\
 apoyo_social_vecinos, apoyo_social_puntaje, apoyo_social_nivel, escolaridad,\
 usa_computador, ocupacion, alimentacion, practica_deporte, cual_deporte,\
 participacion_comunitaria, ha_participado, situaciones_salud,\
 situaciones_consumo, situaciones_entorno, situaciones_economicas,\
 situaciones_legales, peticiones_apoyo, peticiones_necesidades,\
 peticiones_capacitacion, peticiones_asesoria, descripcion_caso,\
 nombre_diligencia, rol_diligencia, telefono_diligencia, emociones\
) VALUES (\
 $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,\
 $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31, $32,\
 $33, $34, $35, $36, $37, $38, $39, $40, $41, $42, $43, $44, $45, $46, $47,\
 $48, $49, $50, $51\
) RETURNING *";

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl BeneficiaryStore for PostgresStore {
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Beneficiary>> {
        let rows = sqlx::query_as::<_, BeneficiaryRow>(
            "SELECT * FROM beneficiarios ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Beneficiary::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: &str) -> Result<Option<Beneficiary>> {
        let row = sqlx::query_as::<_, BeneficiaryRow>("SELECT * FROM beneficiarios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Beneficiary::from))
    }

    #[tracing::instrument(skip(self, draft))]
    async fn create(&self, draft: BeneficiaryDraft) -> Result<Beneficiary> {
        let row = sqlx::query_as::<_, BeneficiaryRow>(INSERT_SQL)
            .bind(Uuid::new_v4().to_string())
            .bind(Utc::now())
            .bind(draft.fecha)
            .bind(draft.hora)
            .bind(draft.caso_numero)
            .bind(draft.forma_contacto)
            .bind(draft.tipo_contacto)
            .bind(draft.lugar_contacto)
            .bind(draft.localidad)
            .bind(draft.barrio)
            .bind(draft.mismo_beneficiario)
            .bind(draft.fuente_nombre)
            .bind(draft.fuente_vinculo)
            .bind(draft.fuente_telefono)
            .bind(draft.nombre_apellido)
            .bind(draft.fecha_nacimiento)
            .bind(draft.genero)
            .bind(draft.direccion)
            .bind(draft.telefono)
            .bind(draft.grupo_etnico)
            .bind(Json(draft.poblaciones_especiales))
            .bind(draft.estado_civil)
            .bind(draft.numero_hijos)
            .bind(draft.convive_con)
            .bind(draft.apoyo_social_personas)
            .bind(draft.apoyo_social_interes)
            .bind(draft.apoyo_social_vecinos)
            .bind(draft.apoyo_social_puntaje)
            .bind(draft.apoyo_social_nivel)
            .bind(draft.escolaridad)
            .bind(draft.usa_computador)
            .bind(draft.ocupacion)
            .bind(draft.alimentacion)
            .bind(draft.practica_deporte)
            .bind(draft.cual_deporte)
            .bind(draft.participacion_comunitaria)
            .bind(draft.ha_participado)
            .bind(Json(draft.situaciones_salud))
            .bind(Json(draft.situaciones_consumo))
            .bind(Json(draft.situaciones_entorno))
            .bind(Json(draft.situaciones_economicas))
            .bind(Json(draft.situaciones_legales))
            .bind(Json(draft.peticiones_apoyo))
            .bind(Json(draft.peticiones_necesidades))
            .bind(Json(draft.peticiones_capacitacion))
            .bind(Json(draft.peticiones_asesoria))
            .bind(draft.descripcion_caso)
            .bind(draft.nombre_diligencia)
            .bind(draft.rol_diligencia)
            .bind(draft.telefono_diligencia)
            .bind(Json(draft.emociones))
            .fetch_one(&self.pool)
            .await?;
        Ok(Beneficiary::from(row))
    }

    #[tracing::instrument(skip(self, patch))]
    async fn update(&self, id: &str, patch: BeneficiaryPatch) -> Result<Option<Beneficiary>> {
        if patch.is_empty() {
            return self.get(id).await;
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE beneficiarios SET ");
        {
            let mut sets = builder.separated(", ");
            macro_rules! set_col {
                ($($field:ident),+ $(,)?) => {
                    $(if let Some(value) = &patch.$field {
                        sets.push(concat!(stringify!($field), " = "));
                        sets.push_bind_unseparated(value.clone());
                    })+
                };
            }
            macro_rules! set_json_col {
                ($($field:ident),+ $(,)?) => {
                    $(if let Some(value) = &patch.$field {
                        sets.push(concat!(stringify!($field), " = "));
                        sets.push_bind_unseparated(Json(value.clone()));
                    })+
                };
            }
            set_col!(
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
            );
            set_json_col!(poblaciones_especiales);
            set_col!(
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
            );
            set_json_col!(
                situaciones_salud,
                situaciones_consumo,
                situaciones_entorno,
                situaciones_economicas,
                situaciones_legales,
                peticiones_apoyo,
                peticiones_necesidades,
                peticiones_capacitacion,
                peticiones_asesoria,
            );
            set_col!(
                descripcion_caso,
                nombre_diligencia,
                rol_diligencia,
                telefono_diligencia,
            );
            set_json_col!(emociones);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id.to_string());
        builder.push(" RETURNING *");

        let row = builder
            .build_query_as::<BeneficiaryRow>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Beneficiary::from))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM beneficiarios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn max_case_number(&self) -> Result<Option<i64>> {
        let max = sqlx::query_scalar::<_, Option<i64>>("SELECT MAX(caso_numero) FROM beneficiarios")
            .fetch_one(&self.pool)
            .await?;
        Ok(max)
    }
}
