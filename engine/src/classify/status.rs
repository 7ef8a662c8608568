// Order status text to dashboard status category.
use super::{any_matches, normalize_status, KeywordRule};
use shared::models::StatusCategory;

use super::KeywordRule::Contains;

/// Ordered rules; the first category with a matching keyword wins.
///
/// "no entregado" is tested before the delivered keywords because it contains
/// "entregado". Delivered keywords are tested before the return keywords so a
/// status mentioning both resolves to `Delivered`.
const STATUS_RULES: &[(StatusCategory, &[KeywordRule])] = &[
    (StatusCategory::ReturnedOrNotDelivered, &[Contains("no entregado")]),
    (
        StatusCategory::Delivered,
        &[
            Contains("entregado"),
            Contains("etiqueta"),
            Contains("concretada"),
            Contains("despachaste"),
            Contains("punto de retiro"),
            Contains("paquete"),
        ],
    ),
    (StatusCategory::Cancelled, &[Contains("cancel")]),
    (
        StatusCategory::ReturnedOrNotDelivered,
        &[
            Contains("reembol"),
            Contains("devuelto"),
            Contains("devol"),
            Contains("devu"),
            Contains("reputacion"),
        ],
    ),
    (StatusCategory::Delayed, &[Contains("demora"), Contains("afecta")]),
    (StatusCategory::AwaitingAgreement, &[Contains("acuerd"), Contains("pendi")]),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct StatusClassifier;

impl StatusClassifier {
    pub fn classify(&self, status: &str) -> StatusCategory {
        let lowered = normalize_status(status);
        STATUS_RULES
            .iter()
            .find(|(_, rules)| any_matches(rules, &lowered))
            .map(|(category, _)| *category)
            .unwrap_or(StatusCategory::Other)
    }
}
