use std::collections::HashMap;

use contracts::domain::a012_user::aggregate::User;
use contracts::domain::a014_transaction::aggregate::{
    completed_total, Transaction, TransactionKind, TransactionStatus,
};
use contracts::domain::common::EntityRecord;
use contracts::shared::list_query::{matches_search, matches_status, ListParams};
use contracts::shared::sections::AdminSection;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::shared::api::entities::EntityApi;
use crate::shared::components::badge::StatusBadge;
use crate::shared::format::{format_datetime, format_money};
use crate::shared::list_utils::{selected_filter, SearchInput, StatusFilter};
use crate::shared::lookups::NONE_LABEL;
use crate::shared::page_frame::PageFrame;
use crate::shared::query_cache::use_query_cache;
use crate::shared::toast::use_toast;

/// Фильтр по описанию, виду и статусу операции
pub fn visible_transactions(
    items: &[Transaction],
    search: &str,
    kind: &str,
    status: &str,
) -> Vec<Transaction> {
    items
        .iter()
        .filter(|t| matches_search(&[t.description.as_str()], search))
        .filter(|t| matches_status(t.kind.as_str(), selected_filter(kind)))
        .filter(|t| matches_status(t.status.as_str(), selected_filter(status)))
        .cloned()
        .collect()
}

#[component]
pub fn TransactionsList() -> impl IntoView {
    let cache = use_query_cache();
    let toast = use_toast();

    let items = RwSignal::new(Vec::<Transaction>::new());
    let users = RwSignal::new(HashMap::<Uuid, String>::new());
    let loading = RwSignal::new(true);
    let search = RwSignal::new(String::new());
    let kind = RwSignal::new("all".to_string());
    let status = RwSignal::new("all".to_string());

    Effect::new(move |_| {
        cache.version(&Transaction::query_key());
        spawn_local(async move {
            match EntityApi::<Transaction>::new()
                .list(&ListParams::sorted("-created_date"))
                .await
            {
                Ok(list) => items.set(list),
                Err(e) => toast.error(format!("Failed to load transactions: {}", e)),
            }
            loading.set(false);
        });
    });

    Effect::new(move |_| {
        cache.version(&User::query_key());
        spawn_local(async move {
            if let Ok(list) = EntityApi::<User>::new().list(&ListParams::default()).await {
                users.set(list.into_iter().map(|u| (u.id(), u.full_name)).collect());
            }
        });
    });

    let visible = Memo::new(move |_| {
        items.with(|list| visible_transactions(list, &search.get(), &kind.get(), &status.get()))
    });
    let total = move || visible.with(|v| completed_total(v));

    let kind_options: Vec<(&'static str, &'static str)> = TransactionKind::all()
        .iter()
        .map(|k| (k.as_str(), k.as_str()))
        .collect();
    let status_options: Vec<(&'static str, &'static str)> = TransactionStatus::all()
        .iter()
        .map(|s| (s.as_str(), s.as_str()))
        .collect();

    view! {
        <PageFrame section=AdminSection::Transactions>
            <div class="filter-bar">
                <SearchInput
                    value=Signal::derive(move || search.get())
                    on_change=Callback::new(move |v: String| search.set(v))
                    placeholder="Search by description..."
                />
                <StatusFilter value=kind options=kind_options />
                <StatusFilter value=status options=status_options />
                <span class="filter-bar__count">
                    {move || format!("{} operations · completed total {}", visible.with(|v| v.len()), format_money(total()))}
                </span>
            </div>
            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="page__loading">"Loading..."</div> }
            >
                <table class="table__data">
                    <thead>
                        <tr>
                            <th>"Date"</th>
                            <th>"User"</th>
                            <th>"Kind"</th>
                            <th>"Description"</th>
                            <th class="table__number">"Amount"</th>
                            <th>"Status"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || visible.get()
                            key=|t| (t.id(), t.meta.updated_date)
                            children=move |t: Transaction| {
                                let user = users
                                    .with(|m| m.get(&t.user_id).cloned())
                                    .unwrap_or_else(|| NONE_LABEL.to_string());
                                let signed = t.signed_amount();
                                let amount_class = if signed < 0.0 {
                                    "table__number table__number--negative"
                                } else {
                                    "table__number"
                                };
                                view! {
                                    <tr>
                                        <td>{format_datetime(&t.meta.created_date)}</td>
                                        <td>{user}</td>
                                        <td><StatusBadge status=t.kind.as_str() /></td>
                                        <td>{t.description.clone()}</td>
                                        <td class=amount_class>{format_money(signed)}</td>
                                        <td><StatusBadge status=t.status.as_str() /></td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::RecordMeta;

    fn tx(kind: TransactionKind, status: TransactionStatus, description: &str) -> Transaction {
        Transaction {
            meta: RecordMeta::new(),
            user_id: Uuid::new_v4(),
            amount: 10.0,
            kind,
            ride_id: None,
            status,
            description: description.to_string(),
        }
    }

    #[test]
    fn test_visible_transactions_combines_filters() {
        let items = vec![
            tx(TransactionKind::Payment, TransactionStatus::Completed, "Ride payment"),
            tx(TransactionKind::Refund, TransactionStatus::Completed, "Ride refund"),
            tx(TransactionKind::Payment, TransactionStatus::Failed, "Card declined"),
        ];
        assert_eq!(visible_transactions(&items, "", "payment", "all").len(), 2);
        assert_eq!(visible_transactions(&items, "ride", "all", "completed").len(), 2);
        assert_eq!(visible_transactions(&items, "ride", "refund", "completed").len(), 1);
    }
}
