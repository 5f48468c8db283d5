//! Report aggregation over the full beneficiary collection.
//!
//! Pure, synchronous, recomputed in full on every request. Counting uses
//! insertion-ordered maps so that equal-count entries in the ranked lists
//! keep their first-encountered input order under the stable sort.

use chrono::{Datelike, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use utoipa::ToSchema;

use models_intake::Beneficiary;

const UNSPECIFIED: &str = "No especificado";

/// Fixed age bucket boundaries, labeled as shown on the dashboard.
const AGE_BUCKETS: [(&str, i32, i32); 5] = [
    ("0-17", i32::MIN, 18),
    ("18-29", 18, 30),
    ("30-49", 30, 50),
    ("50-64", 50, 65),
    ("65+", 65, i32::MAX),
];

/// One label with its occurrence count, for the ranked lists.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountEntry {
    pub label: String,
    pub count: u64,
}

/// Statistics summary driving the reporting dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Total number of records aggregated.
    pub total: u64,
    /// Count per gender; missing/empty gender groups under "No especificado".
    pub generos: IndexMap<String, u64>,
    /// Count per fixed age range; records without a parseable birth year are
    /// excluded entirely.
    pub rango_edades: IndexMap<String, u64>,
    /// Top 5 localities by count, descending.
    pub top_localidades: Vec<CountEntry>,
    /// Top 10 situation tags across all five situation sets.
    pub top_situaciones: Vec<CountEntry>,
    /// Top 10 request tags across all four request sets.
    pub top_peticiones: Vec<CountEntry>,
    /// Count per occupation, unsorted; the consumer sorts at render time.
    pub ocupaciones: IndexMap<String, u64>,
    /// Count per schooling level, unsorted.
    pub escolaridades: IndexMap<String, u64>,
}

/// Aggregate the full record list against the current year.
pub fn summarize(records: &[Beneficiary]) -> ReportSummary {
    summarize_at(records, Utc::now().year())
}

/// Aggregate against an explicit "current year" (ages are year arithmetic
/// only, no month/day adjustment).
pub fn summarize_at(records: &[Beneficiary], current_year: i32) -> ReportSummary {
    let mut generos: IndexMap<String, u64> = IndexMap::new();
    let mut localidades: IndexMap<String, u64> = IndexMap::new();
    let mut situaciones: IndexMap<String, u64> = IndexMap::new();
    let mut peticiones: IndexMap<String, u64> = IndexMap::new();
    let mut ocupaciones: IndexMap<String, u64> = IndexMap::new();
    let mut escolaridades: IndexMap<String, u64> = IndexMap::new();

    let mut rango_edades: IndexMap<String, u64> = AGE_BUCKETS
        .iter()
        .map(|(label, _, _)| (label.to_string(), 0))
        .collect();

    for record in records {
        *generos
            .entry(label_or_unspecified(record.genero.as_deref()))
            .or_default() += 1;
        *localidades
            .entry(label_or_unspecified(record.localidad.as_deref()))
            .or_default() += 1;
        *ocupaciones
            .entry(label_or_unspecified(record.ocupacion.as_deref()))
            .or_default() += 1;
        *escolaridades
            .entry(label_or_unspecified(record.escolaridad.as_deref()))
            .or_default() += 1;

        if let Some(year) = birth_year(record.fecha_nacimiento.as_deref()) {
            let age = current_year - year;
            for (label, lo, hi) in AGE_BUCKETS {
                if age >= lo && age < hi {
                    *rango_edades.entry(label.to_string()).or_default() += 1;
                    break;
                }
            }
        }

        count_tags(
            &mut situaciones,
            [
                &record.situaciones_salud,
                &record.situaciones_consumo,
                &record.situaciones_entorno,
                &record.situaciones_economicas,
                &record.situaciones_legales,
            ],
        );
        count_tags(
            &mut peticiones,
            [
                &record.peticiones_apoyo,
                &record.peticiones_necesidades,
                &record.peticiones_capacitacion,
                &record.peticiones_asesoria,
            ],
        );
    }

    ReportSummary {
        total: records.len() as u64,
        generos,
        rango_edades,
        top_localidades: top_n(localidades, 5),
        top_situaciones: top_n(situaciones, 10),
        top_peticiones: top_n(peticiones, 10),
        ocupaciones,
        escolaridades,
    }
}

fn label_or_unspecified(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => UNSPECIFIED.to_string(),
    }
}

/// Birth year from the leading four digits of a stored date string.
fn birth_year(fecha_nacimiento: Option<&str>) -> Option<i32> {
    fecha_nacimiento?.trim().get(..4)?.parse().ok()
}

fn count_tags<'a, const N: usize>(
    counts: &mut IndexMap<String, u64>,
    sets: [&'a Vec<String>; N],
) {
    for set in sets {
        for tag in set {
            let tag = tag.trim();
            if tag.is_empty() {
                continue;
            }
            *counts.entry(tag.to_string()).or_default() += 1;
        }
    }
}

/// Descending by count; the sort is stable, so ties keep the order in which
/// labels were first encountered in the input.
fn top_n(counts: IndexMap<String, u64>, n: usize) -> Vec<CountEntry> {
    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(label, count)| CountEntry { label, count })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(n);
    entries
}
