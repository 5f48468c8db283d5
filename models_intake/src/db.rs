//! Database row representation of a beneficiary record.
//!
//! One row type serves both SQL backends: the derive is generic over the
//! database, and every column decodes to the same Rust type on Postgres and
//! MySQL. JSON columns land as raw [`serde_json::Value`] and are decoded
//! into uniform collections exactly once, in the conversion to
//! [`Beneficiary`].

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::beneficiary::Beneficiary;
use crate::emotions::decode_emotions;
use crate::tags::decode_string_array;

/// Raw row from the `beneficiarios` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BeneficiaryRow {
    pub id: String,
    pub created_at: DateTime<Utc>,
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
    pub poblaciones_especiales: Option<Value>,
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
    pub situaciones_salud: Option<Value>,
    pub situaciones_consumo: Option<Value>,
    pub situaciones_entorno: Option<Value>,
    pub situaciones_economicas: Option<Value>,
    pub situaciones_legales: Option<Value>,
    pub peticiones_apoyo: Option<Value>,
    pub peticiones_necesidades: Option<Value>,
    pub peticiones_capacitacion: Option<Value>,
    pub peticiones_asesoria: Option<Value>,
    pub descripcion_caso: Option<String>,
    pub nombre_diligencia: Option<String>,
    pub rol_diligencia: Option<String>,
    pub telefono_diligencia: Option<String>,
    pub emociones: Option<Value>,
}

fn decode_tags(value: Option<Value>) -> Vec<String> {
    value
        .map(|v| decode_string_array(&v))
        .unwrap_or_default()
}

impl From<BeneficiaryRow> for Beneficiary {
    fn from(row: BeneficiaryRow) -> Self {
        Beneficiary {
            id: row.id,
            created_at: row.created_at,
            fecha: row.fecha,
            hora: row.hora,
            caso_numero: row.caso_numero,
            forma_contacto: row.forma_contacto,
            tipo_contacto: row.tipo_contacto,
            lugar_contacto: row.lugar_contacto,
            localidad: row.localidad,
            barrio: row.barrio,
            mismo_beneficiario: row.mismo_beneficiario,
            fuente_nombre: row.fuente_nombre,
            fuente_vinculo: row.fuente_vinculo,
            fuente_telefono: row.fuente_telefono,
            nombre_apellido: row.nombre_apellido,
            fecha_nacimiento: row.fecha_nacimiento,
            genero: row.genero,
            direccion: row.direccion,
            telefono: row.telefono,
            grupo_etnico: row.grupo_etnico,
            poblaciones_especiales: decode_tags(row.poblaciones_especiales),
            estado_civil: row.estado_civil,
            numero_hijos: row.numero_hijos,
            convive_con: row.convive_con,
            apoyo_social_personas: row.apoyo_social_personas,
            apoyo_social_interes: row.apoyo_social_interes,
            apoyo_social_vecinos: row.apoyo_social_vecinos,
            apoyo_social_puntaje: row.apoyo_social_puntaje,
            apoyo_social_nivel: row.apoyo_social_nivel,
            escolaridad: row.escolaridad,
            usa_computador: row.usa_computador,
            ocupacion: row.ocupacion,
            alimentacion: row.alimentacion,
            practica_deporte: row.practica_deporte,
            cual_deporte: row.cual_deporte,
            participacion_comunitaria: row.participacion_comunitaria,
            ha_participado: row.ha_participado,
            situaciones_salud: decode_tags(row.situaciones_salud),
            situaciones_consumo: decode_tags(row.situaciones_consumo),
            situaciones_entorno: decode_tags(row.situaciones_entorno),
            situaciones_economicas: decode_tags(row.situaciones_economicas),
            situaciones_legales: decode_tags(row.situaciones_legales),
            peticiones_apoyo: decode_tags(row.peticiones_apoyo),
            peticiones_necesidades: decode_tags(row.peticiones_necesidades),
            peticiones_capacitacion: decode_tags(row.peticiones_capacitacion),
            peticiones_asesoria: decode_tags(row.peticiones_asesoria),
            descripcion_caso: row.descripcion_caso,
            nombre_diligencia: row.nombre_diligencia,
            rol_diligencia: row.rol_diligencia,
            telefono_diligencia: row.telefono_diligencia,
            emociones: row
                .emociones
                .map(|v| decode_emotions(&v))
                .unwrap_or_default(),
        }
    }
}
