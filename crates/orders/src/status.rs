//! Order and payment status enums.

use serde::{Deserialize, Serialize};

/// Fulfillment status of an order.
///
/// Status transitions:
/// ```text
/// Pending ──► Confirmed ──► Processing ──► Shipped ──► Delivered
///    │            │             │            │
///    └────────────┴─────────────┴────────────┴──► Cancelled
/// ```
///
/// `Delivered` and `Cancelled` are terminal. Repeating the current status
/// is a legal no-op, which keeps the shipped/delivered timestamps
/// idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order has been placed and stock reserved.
    #[default]
    Pending,

    /// Order has been confirmed for fulfillment.
    Confirmed,

    /// Order is being picked and packed.
    Processing,

    /// Order has left the warehouse.
    Shipped,

    /// Order reached the customer (terminal state).
    Delivered,

    /// Order was cancelled and its stock restored (terminal state).
    Cancelled,
}

impl OrderStatus {
    /// Returns true if `next` is a legal transition from this status.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;

        if next == Cancelled {
            return !self.is_terminal();
        }
        if next == self {
            return true;
        }
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Confirmed, Processing)
                | (Processing, Shipped)
                | (Shipped, Delivered)
        )
    }

    /// Returns true if no further transition is permitted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment status of an order.
///
/// Independent of [`OrderStatus`]; the only coupling is
/// [`Order::is_completed`](crate::Order::is_completed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    /// Payment has not been collected yet.
    #[default]
    Pending,

    /// Payment has been collected.
    Paid,

    /// Payment was attempted and failed.
    Failed,

    /// A collected payment was returned.
    Refunded,
}

impl PaymentStatus {
    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Failed => "Failed",
            PaymentStatus::Refunded => "Refunded",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    BankTransfer,
    DigitalWallet,
}

impl PaymentMethod {
    /// Returns the method name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::DigitalWallet => "Digital Wallet",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn default_statuses_are_pending() {
        assert_eq!(OrderStatus::default(), Pending);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
    }

    #[test]
    fn forward_chain_is_legal() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));
    }

    #[test]
    fn skipping_ahead_is_illegal() {
        assert!(!Pending.can_transition_to(Processing));
        assert!(!Pending.can_transition_to(Shipped));
        assert!(!Confirmed.can_transition_to(Delivered));
    }

    #[test]
    fn moving_backwards_is_illegal() {
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Shipped.can_transition_to(Processing));
        assert!(!Delivered.can_transition_to(Shipped));
    }

    #[test]
    fn cancel_reachable_from_non_terminal_states_only() {
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(Processing.can_transition_to(Cancelled));
        assert!(Shipped.can_transition_to(Cancelled));
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Cancelled));
    }

    #[test]
    fn repeating_a_status_is_legal_except_cancelled() {
        assert!(Pending.can_transition_to(Pending));
        assert!(Shipped.can_transition_to(Shipped));
        assert!(Delivered.can_transition_to(Delivered));
        assert!(!Cancelled.can_transition_to(Cancelled));
    }

    #[test]
    fn terminal_states() {
        assert!(!Pending.is_terminal());
        assert!(!Confirmed.is_terminal());
        assert!(!Processing.is_terminal());
        assert!(!Shipped.is_terminal());
        assert!(Delivered.is_terminal());
        assert!(Cancelled.is_terminal());
    }

    #[test]
    fn nothing_leaves_terminal_states() {
        for next in [Pending, Confirmed, Processing, Shipped, Cancelled] {
            assert!(!Cancelled.can_transition_to(next));
        }
        for next in [Pending, Confirmed, Processing, Shipped, Cancelled] {
            assert!(!Delivered.can_transition_to(next));
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(Shipped.to_string(), "Shipped");
        assert_eq!(PaymentStatus::Refunded.to_string(), "Refunded");
        assert_eq!(PaymentMethod::CreditCard.to_string(), "Credit Card");
    }

    #[test]
    fn serialization_roundtrip() {
        let json = serde_json::to_string(&Processing).unwrap();
        let back: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Processing);
    }
}
