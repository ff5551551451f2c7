//! Общие кнопки жизненного цикла партнёрских аккаунтов
//! (corporate / hotel / dispatcher).

use contracts::domain::common::{PartnerAction, PartnerStatus, PartnerTransition};
use leptos::prelude::*;

use crate::shared::components::badge::StatusBadge;
use crate::shared::crud::{CrudResource, RowActions};

/// Запись со статусом `pending → active ⇄ suspended`
pub trait PartnerRecord: CrudResource {
    fn partner_status(&self) -> PartnerStatus;
    fn set_partner_status(&mut self, status: PartnerStatus);
}

pub fn partner_status_options() -> Vec<(&'static str, &'static str)> {
    PartnerStatus::all()
        .iter()
        .map(|s| (s.as_str(), s.label()))
        .collect()
}

pub fn partner_status_badge(status: PartnerStatus) -> AnyView {
    view! { <StatusBadge status=status.as_str() label=status.label() /> }.into_any()
}

fn button_class(action: PartnerAction) -> &'static str {
    match action {
        PartnerAction::Approve | PartnerAction::Reactivate => "button button--small button--success",
        PartnerAction::Suspend => "button button--small button--warning",
        PartnerAction::Reject => "button button--small button--danger",
    }
}

/// Кнопки действий для текущего статуса записи
pub fn partner_row_actions<T: PartnerRecord>(record: &T, actions: RowActions<T>) -> AnyView {
    let status = record.partner_status();
    status
        .allowed_actions()
        .iter()
        .copied()
        .map(|action| {
            let record = record.clone();
            let on_click = move |_| match status.apply(action) {
                Ok(PartnerTransition::Status(next)) => {
                    let mut changed = record.clone();
                    changed.set_partner_status(next);
                    actions.update.run(changed);
                }
                Ok(PartnerTransition::Remove) => actions.delete.run(record.clone()),
                Err(e) => log::warn!("{}", e),
            };
            view! {
                <button class=button_class(action) on:click=on_click>
                    {action.label()}
                </button>
            }
        })
        .collect_view()
        .into_any()
}
