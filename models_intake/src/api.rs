//! API layer input shape.
//!
//! The form layer submits camelCase field names; storage columns are
//! snake_case. The mapping lives here, in the serde renames on
//! [`BeneficiaryInput`], together with the lenient coercions from
//! [`crate::normalize`]. The same input shape serves both create (flattened
//! via [`BeneficiaryInput::into_draft`]) and partial update (via
//! [`BeneficiaryInput::into_patch`], where absent fields stay untouched).

use serde::Deserialize;
use utoipa::ToSchema;

use crate::beneficiary::{BeneficiaryDraft, BeneficiaryPatch};
use crate::emotions::EmotionEntry;
use crate::normalize;

/// Incoming beneficiary payload, UI-shaped.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryInput {
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub fecha: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub hora: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::case_number_or_null")]
    pub caso_numero: Option<Option<i64>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub forma_contacto: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub tipo_contacto: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub lugar_contacto: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub localidad: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub barrio: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub mismo_beneficiario: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub fuente_nombre: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub fuente_vinculo: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub fuente_telefono: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub nombre_apellido: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub fecha_nacimiento: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub genero: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub direccion: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub telefono: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub grupo_etnico: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::tags_or_empty")]
    pub poblaciones_especiales: Option<Vec<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub estado_civil: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub numero_hijos: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub convive_con: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::number_or_null")]
    pub apoyo_social_personas: Option<Option<f64>>,
    #[serde(default, deserialize_with = "normalize::number_or_null")]
    pub apoyo_social_interes: Option<Option<f64>>,
    // Historical irregularity: the form field is "apoyoSocialAyudaVecinos"
    // but the column is apoyo_social_vecinos.
    #[serde(
        default,
        rename = "apoyoSocialAyudaVecinos",
        deserialize_with = "normalize::number_or_null"
    )]
    pub apoyo_social_vecinos: Option<Option<f64>>,
    #[serde(default, deserialize_with = "normalize::number_or_null")]
    pub apoyo_social_puntaje: Option<Option<f64>>,
    #[serde(default, deserialize_with = "normalize::text_or_null")]
    pub apoyo_social_nivel: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub escolaridad: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub usa_computador: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub ocupacion: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub alimentacion: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub practica_deporte: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub cual_deporte: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub participacion_comunitaria: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub ha_participado: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::tags_or_empty")]
    pub situaciones_salud: Option<Vec<String>>,
    #[serde(default, deserialize_with = "normalize::tags_or_empty")]
    pub situaciones_consumo: Option<Vec<String>>,
    #[serde(default, deserialize_with = "normalize::tags_or_empty")]
    pub situaciones_entorno: Option<Vec<String>>,
    #[serde(default, deserialize_with = "normalize::tags_or_empty")]
    pub situaciones_economicas: Option<Vec<String>>,
    #[serde(default, deserialize_with = "normalize::tags_or_empty")]
    pub situaciones_legales: Option<Vec<String>>,
    #[serde(default, deserialize_with = "normalize::tags_or_empty")]
    pub peticiones_apoyo: Option<Vec<String>>,
    #[serde(default, deserialize_with = "normalize::tags_or_empty")]
    pub peticiones_necesidades: Option<Vec<String>>,
    #[serde(default, deserialize_with = "normalize::tags_or_empty")]
    pub peticiones_capacitacion: Option<Vec<String>>,
    #[serde(default, deserialize_with = "normalize::tags_or_empty")]
    pub peticiones_asesoria: Option<Vec<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub descripcion_caso: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub nombre_diligencia: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub rol_diligencia: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::patch_field")]
    pub telefono_diligencia: Option<Option<String>>,
    #[serde(default, deserialize_with = "normalize::emotions_or_empty")]
    pub emociones: Option<Vec<EmotionEntry>>,
}

impl BeneficiaryInput {
    /// Flatten into the insert shape: absent fields become NULL, absent
    /// arrays become empty, and gender is capitalized.
    pub fn into_draft(self) -> BeneficiaryDraft {
        BeneficiaryDraft {
            fecha: self.fecha.flatten(),
            hora: self.hora.flatten(),
            caso_numero: self.caso_numero.flatten(),
            forma_contacto: self.forma_contacto.flatten(),
            tipo_contacto: self.tipo_contacto.flatten(),
            lugar_contacto: self.lugar_contacto.flatten(),
            localidad: self.localidad.flatten(),
            barrio: self.barrio.flatten(),
            mismo_beneficiario: self.mismo_beneficiario.flatten(),
            fuente_nombre: self.fuente_nombre.flatten(),
            fuente_vinculo: self.fuente_vinculo.flatten(),
            fuente_telefono: self.fuente_telefono.flatten(),
            nombre_apellido: self.nombre_apellido.flatten(),
            fecha_nacimiento: self.fecha_nacimiento.flatten(),
            genero: self
                .genero
                .flatten()
                .map(|genero| normalize::capitalize(&genero)),
            direccion: self.direccion.flatten(),
            telefono: self.telefono.flatten(),
            grupo_etnico: self.grupo_etnico.flatten(),
            poblaciones_especiales: self.poblaciones_especiales.unwrap_or_default(),
            estado_civil: self.estado_civil.flatten(),
            numero_hijos: self.numero_hijos.flatten(),
            convive_con: self.convive_con.flatten(),
            apoyo_social_personas: self.apoyo_social_personas.flatten(),
            apoyo_social_interes: self.apoyo_social_interes.flatten(),
            apoyo_social_vecinos: self.apoyo_social_vecinos.flatten(),
            apoyo_social_puntaje: self.apoyo_social_puntaje.flatten(),
            apoyo_social_nivel: self.apoyo_social_nivel.flatten(),
            escolaridad: self.escolaridad.flatten(),
            usa_computador: self.usa_computador.flatten(),
            ocupacion: self.ocupacion.flatten(),
            alimentacion: self.alimentacion.flatten(),
            practica_deporte: self.practica_deporte.flatten(),
            cual_deporte: self.cual_deporte.flatten(),
            participacion_comunitaria: self.participacion_comunitaria.flatten(),
            ha_participado: self.ha_participado.flatten(),
            situaciones_salud: self.situaciones_salud.unwrap_or_default(),
            situaciones_consumo: self.situaciones_consumo.unwrap_or_default(),
            situaciones_entorno: self.situaciones_entorno.unwrap_or_default(),
            situaciones_economicas: self.situaciones_economicas.unwrap_or_default(),
            situaciones_legales: self.situaciones_legales.unwrap_or_default(),
            peticiones_apoyo: self.peticiones_apoyo.unwrap_or_default(),
            peticiones_necesidades: self.peticiones_necesidades.unwrap_or_default(),
            peticiones_capacitacion: self.peticiones_capacitacion.unwrap_or_default(),
            peticiones_asesoria: self.peticiones_asesoria.unwrap_or_default(),
            descripcion_caso: self.descripcion_caso.flatten(),
            nombre_diligencia: self.nombre_diligencia.flatten(),
            rol_diligencia: self.rol_diligencia.flatten(),
            telefono_diligencia: self.telefono_diligencia.flatten(),
            emociones: self.emociones.unwrap_or_default(),
        }
    }

    /// Keep PATCH semantics: absent fields stay absent, present fields carry
    /// their normalized value. Gender is capitalized here too.
    pub fn into_patch(self) -> BeneficiaryPatch {
        BeneficiaryPatch {
            fecha: self.fecha,
            hora: self.hora,
            caso_numero: self.caso_numero,
            forma_contacto: self.forma_contacto,
            tipo_contacto: self.tipo_contacto,
            lugar_contacto: self.lugar_contacto,
            localidad: self.localidad,
            barrio: self.barrio,
            mismo_beneficiario: self.mismo_beneficiario,
            fuente_nombre: self.fuente_nombre,
            fuente_vinculo: self.fuente_vinculo,
            fuente_telefono: self.fuente_telefono,
            nombre_apellido: self.nombre_apellido,
            fecha_nacimiento: self.fecha_nacimiento,
            genero: self
                .genero
                .map(|genero| genero.map(|g| normalize::capitalize(&g))),
            direccion: self.direccion,
            telefono: self.telefono,
            grupo_etnico: self.grupo_etnico,
            poblaciones_especiales: self.poblaciones_especiales,
            estado_civil: self.estado_civil,
            numero_hijos: self.numero_hijos,
            convive_con: self.convive_con,
            apoyo_social_personas: self.apoyo_social_personas,
            apoyo_social_interes: self.apoyo_social_interes,
            apoyo_social_vecinos: self.apoyo_social_vecinos,
            apoyo_social_puntaje: self.apoyo_social_puntaje,
            apoyo_social_nivel: self.apoyo_social_nivel,
            escolaridad: self.escolaridad,
            usa_computador: self.usa_computador,
            ocupacion: self.ocupacion,
            alimentacion: self.alimentacion,
            practica_deporte: self.practica_deporte,
            cual_deporte: self.cual_deporte,
            participacion_comunitaria: self.participacion_comunitaria,
            ha_participado: self.ha_participado,
            situaciones_salud: self.situaciones_salud,
            situaciones_consumo: self.situaciones_consumo,
            situaciones_entorno: self.situaciones_entorno,
            situaciones_economicas: self.situaciones_economicas,
            situaciones_legales: self.situaciones_legales,
            peticiones_apoyo: self.peticiones_apoyo,
            peticiones_necesidades: self.peticiones_necesidades,
            peticiones_capacitacion: self.peticiones_capacitacion,
            peticiones_asesoria: self.peticiones_asesoria,
            descripcion_caso: self.descripcion_caso,
            nombre_diligencia: self.nombre_diligencia,
            rol_diligencia: self.rol_diligencia,
            telefono_diligencia: self.telefono_diligencia,
            emociones: self.emociones,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn camel_case_maps_to_columns() {
        let input: BeneficiaryInput = serde_json::from_value(json!({
            "casoNumero": "12",
            "formaContacto": "Presencial",
            "nombreApellido": "Ana Pérez",
            "apoyoSocialAyudaVecinos": "3",
        }))
        .unwrap();

        let draft = input.into_draft();
        assert_eq!(draft.caso_numero, Some(12));
        assert_eq!(draft.forma_contacto.as_deref(), Some("Presencial"));
        assert_eq!(draft.nombre_apellido.as_deref(), Some("Ana Pérez"));
        assert_eq!(draft.apoyo_social_vecinos, Some(3.0));
    }

    #[test]
    fn draft_defaults_arrays_and_nulls_scores() {
        let input: BeneficiaryInput = serde_json::from_value(json!({
            "apoyoSocialPersonas": "",
            "apoyoSocialNivel": "",
            "situacionesSalud": "[\"Salud mental\"]",
        }))
        .unwrap();

        let draft = input.into_draft();
        assert_eq!(draft.apoyo_social_personas, None);
        assert_eq!(draft.apoyo_social_nivel, None);
        assert_eq!(draft.situaciones_salud, vec!["Salud mental".to_string()]);
        assert!(draft.peticiones_apoyo.is_empty());
        assert!(draft.emociones.is_empty());
    }

    #[test]
    fn gender_capitalized_on_create_and_update() {
        let input: BeneficiaryInput =
            serde_json::from_value(json!({ "genero": "masculino" })).unwrap();
        assert_eq!(
            input.clone().into_draft().genero.as_deref(),
            Some("Masculino")
        );
        assert_eq!(
            input.into_patch().genero,
            Some(Some("Masculino".to_string()))
        );
    }

    #[test]
    fn empty_payload_is_empty_patch() {
        let input: BeneficiaryInput = serde_json::from_value(json!({})).unwrap();
        assert!(input.into_patch().is_empty());
    }

    #[test]
    fn patch_keeps_absent_fields_absent() {
        let input: BeneficiaryInput = serde_json::from_value(json!({
            "localidad": "Bosa",
            "barrio": null,
        }))
        .unwrap();
        let patch = input.into_patch();
        assert_eq!(patch.localidad, Some(Some("Bosa".to_string())));
        assert_eq!(patch.barrio, Some(None));
        assert_eq!(patch.nombre_apellido, None);
        assert_eq!(patch.situaciones_salud, None);
    }
}
