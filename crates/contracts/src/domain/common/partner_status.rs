use serde::{Deserialize, Serialize};

/// Статус партнёрского аккаунта (corporate / hotel / dispatcher)
///
/// Жизненный цикл: `pending → active ⇄ suspended`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PartnerStatus {
    #[default]
    Pending,
    Active,
    Suspended,
}

/// Действие администратора над партнёрским аккаунтом
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerAction {
    Approve,
    Reject,
    Suspend,
    Reactivate,
}

/// Результат применения действия
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartnerTransition {
    /// Запись остаётся, статус меняется
    Status(PartnerStatus),
    /// Заявка отклонена, запись удаляется
    Remove,
}

impl PartnerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartnerStatus::Pending => "pending",
            PartnerStatus::Active => "active",
            PartnerStatus::Suspended => "suspended",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PartnerStatus::Pending => "Pending",
            PartnerStatus::Active => "Active",
            PartnerStatus::Suspended => "Suspended",
        }
    }

    pub fn all() -> [PartnerStatus; 3] {
        [
            PartnerStatus::Pending,
            PartnerStatus::Active,
            PartnerStatus::Suspended,
        ]
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|st| st.as_str() == s)
    }

    /// Кнопки, которые показываются для текущего статуса
    pub fn allowed_actions(&self) -> &'static [PartnerAction] {
        match self {
            PartnerStatus::Pending => &[PartnerAction::Approve, PartnerAction::Reject],
            PartnerStatus::Active => &[PartnerAction::Suspend],
            PartnerStatus::Suspended => &[PartnerAction::Reactivate],
        }
    }

    pub fn apply(&self, action: PartnerAction) -> Result<PartnerTransition, String> {
        if !self.allowed_actions().contains(&action) {
            return Err(format!(
                "Action '{}' is not available for a {} account",
                action.label(),
                self.as_str()
            ));
        }
        Ok(match action {
            PartnerAction::Approve | PartnerAction::Reactivate => {
                PartnerTransition::Status(PartnerStatus::Active)
            }
            PartnerAction::Suspend => PartnerTransition::Status(PartnerStatus::Suspended),
            PartnerAction::Reject => PartnerTransition::Remove,
        })
    }
}

impl PartnerAction {
    pub fn label(&self) -> &'static str {
        match self {
            PartnerAction::Approve => "Approve",
            PartnerAction::Reject => "Reject",
            PartnerAction::Suspend => "Suspend",
            PartnerAction::Reactivate => "Reactivate",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_per_status() {
        assert_eq!(
            PartnerStatus::Pending.allowed_actions(),
            &[PartnerAction::Approve, PartnerAction::Reject]
        );
        assert_eq!(
            PartnerStatus::Active.allowed_actions(),
            &[PartnerAction::Suspend]
        );
        assert_eq!(
            PartnerStatus::Suspended.allowed_actions(),
            &[PartnerAction::Reactivate]
        );
    }

    #[test]
    fn test_lifecycle_round_trip() {
        let active = PartnerStatus::Pending.apply(PartnerAction::Approve).unwrap();
        assert_eq!(active, PartnerTransition::Status(PartnerStatus::Active));

        let suspended = PartnerStatus::Active.apply(PartnerAction::Suspend).unwrap();
        assert_eq!(suspended, PartnerTransition::Status(PartnerStatus::Suspended));

        let back = PartnerStatus::Suspended
            .apply(PartnerAction::Reactivate)
            .unwrap();
        assert_eq!(back, PartnerTransition::Status(PartnerStatus::Active));
    }

    #[test]
    fn test_reject_removes_pending_only() {
        assert_eq!(
            PartnerStatus::Pending.apply(PartnerAction::Reject),
            Ok(PartnerTransition::Remove)
        );
        assert!(PartnerStatus::Active.apply(PartnerAction::Reject).is_err());
        assert!(PartnerStatus::Suspended.apply(PartnerAction::Suspend).is_err());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&PartnerStatus::Suspended).unwrap();
        assert_eq!(json, "\"suspended\"");
        assert_eq!(PartnerStatus::from_str("active"), Some(PartnerStatus::Active));
        assert_eq!(PartnerStatus::from_str("archived"), None);
    }
}
