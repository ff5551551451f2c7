use leptos::prelude::*;

/// Вариант бейджа по строковому статусу записи
pub fn variant_for_status(status: &str) -> &'static str {
    match status {
        "active" | "approved" | "completed" | "online" | "configured" => "success",
        "pending" | "requested" | "scheduled" | "accepted" | "arriving" | "in_progress" => "warning",
        "suspended" | "rejected" | "blocked" | "cancelled" | "failed" | "missing" => "error",
        _ => "neutral",
    }
}

#[component]
pub fn StatusBadge(#[prop(into)] status: String, #[prop(optional, into)] label: String) -> impl IntoView {
    let class = format!("badge badge--{}", variant_for_status(&status));
    let text = if label.is_empty() { status.replace('_', " ") } else { label };
    view! { <span class=class>{text}</span> }
}

/// Бейдж флага `is_active`
pub fn active_badge(is_active: bool) -> AnyView {
    if is_active {
        view! { <StatusBadge status="active" label="Active" /> }.into_any()
    } else {
        view! { <StatusBadge status="inactive" label="Inactive" /> }.into_any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_for_status() {
        assert_eq!(variant_for_status("active"), "success");
        assert_eq!(variant_for_status("in_progress"), "warning");
        assert_eq!(variant_for_status("cancelled"), "error");
        assert_eq!(variant_for_status("topup"), "neutral");
    }
}
