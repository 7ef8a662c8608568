// Revenue eligibility and the KPI problem counters.
//
// These rules overlap with the status categories but are deliberately kept
// separate: "En camino" counts as a sale without being a delivered status.
use super::{any_matches, normalize_status, KeywordRule};

use super::KeywordRule::{Contains, Exact};

const VALID_SALE: &[KeywordRule] = &[
    Exact("entregado"),
    Exact("venta concretada"),
    Contains("acuerda"),
    Contains("etiqueta"),
    Contains("punto de retiro"),
    Contains("venta entregada"),
    Contains("paquete de"),
    Contains("en camino"),
];

const CANCELLED: &[KeywordRule] = &[Contains("cancel")];

const PROBLEMATIC: &[KeywordRule] = &[
    Contains("demora"),
    Contains("reputacion"),
    Contains("afecta"),
    Contains("reembolso"),
    Contains("devuelto"),
    Contains("devol"),
    Contains("no entregado"),
    Contains("devu"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct SaleClassifier;

impl SaleClassifier {
    /// Whether the order counts toward revenue and rankings.
    pub fn is_valid_sale(&self, status: &str) -> bool {
        any_matches(VALID_SALE, &normalize_status(status))
    }

    pub fn is_cancelled(&self, status: &str) -> bool {
        any_matches(CANCELLED, &normalize_status(status))
    }

    /// Delayed, returned, refunded or undelivered orders.
    pub fn is_problematic(&self, status: &str) -> bool {
        any_matches(PROBLEMATIC, &normalize_status(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::StatusClassifier;
    use shared::models::StatusCategory;

    #[test]
    fn test_valid_sales() {
        let sales = SaleClassifier;
        assert!(sales.is_valid_sale("Entregado"));
        assert!(sales.is_valid_sale(" venta concretada "));
        assert!(sales.is_valid_sale("Acuerda la entrega con tu comprador"));
        assert!(sales.is_valid_sale("Etiqueta lista para imprimir"));
        assert!(sales.is_valid_sale("Paquete de 2 productos"));
        assert!(sales.is_valid_sale("En camino"));
    }

    #[test]
    fn test_exact_rules_do_not_match_longer_text() {
        let sales = SaleClassifier;
        assert!(!sales.is_valid_sale("No entregado"));
        assert!(!sales.is_valid_sale("Entregado y devuelto"));
        assert!(!sales.is_valid_sale("Cancelada"));
        assert!(!sales.is_valid_sale(""));
    }

    #[test]
    fn test_cancelled_and_problematic() {
        let sales = SaleClassifier;
        assert!(sales.is_cancelled("Cancelaste la venta"));
        assert!(sales.is_cancelled("cancelada"));
        assert!(!sales.is_cancelled("Entregado"));
        assert!(sales.is_problematic("Con demora"));
        assert!(sales.is_problematic("Devolución en camino"));
        assert!(sales.is_problematic("No entregado"));
        assert!(!sales.is_problematic("Entregado"));
    }

    #[test]
    fn test_sale_and_status_rules_can_disagree() {
        assert!(SaleClassifier.is_valid_sale("En camino"));
        assert_eq!(StatusClassifier.classify("En camino"), StatusCategory::Other);
    }
}
