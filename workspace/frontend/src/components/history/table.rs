use common::{FormField, PredictionRecord, RiskLevel};
use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::storage;
use crate::widgets::toast::ToastContext;

/// Time the "Clear All" button stays armed for the confirming second click.
const CLEAR_CONFIRM_MS: u32 = 3000;

/// Local date and time shown in the table, e.g. `Jan 5, 2024, 02:30 PM`.
/// Unparseable timestamps are shown as stored.
pub fn display_date(record: &PredictionRecord) -> String {
    match record.parsed_timestamp() {
        Some(ts) => ts
            .with_timezone(&chrono::Local)
            .format("%b %-d, %Y, %I:%M %p")
            .to_string(),
        None => record.timestamp.clone(),
    }
}

pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 prediction saved".to_string()
    } else {
        format!("{} predictions saved", count)
    }
}

fn badge_class(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "badge-success",
        RiskLevel::Moderate => "badge-warning",
        RiskLevel::High => "badge-error",
    }
}

#[derive(Properties, PartialEq)]
pub struct HistoryTableProps {
    pub history: Vec<PredictionRecord>,
    /// Fired after any change to the stored history.
    pub on_update: Callback<()>,
}

#[function_component(HistoryTable)]
pub fn history_table(props: &HistoryTableProps) -> Html {
    let toast = use_context::<ToastContext>();
    let expanded = use_state(|| None::<String>);
    let confirm_clear = use_state(|| false);

    if props.history.is_empty() {
        return html! {
            <div class="card bg-base-100 shadow">
                <div class="card-body items-center text-center py-16">
                    <i class="fas fa-clipboard-list text-5xl text-base-content/30"></i>
                    <h3 class="text-xl font-semibold mt-4">{"No Predictions Yet"}</h3>
                    <p class="text-base-content/70">{"Predictions you make are saved here on this device."}</p>
                </div>
            </div>
        };
    }

    let on_export = {
        let toast = toast.clone();
        Callback::from(move |_| {
            let result = storage::download_csv();
            if let Some(toast) = &toast {
                match result {
                    Ok(()) => toast.show_success("Prediction history exported".to_string()),
                    Err(e) => toast.show_error(e),
                }
            }
        })
    };

    let on_clear = {
        let confirm_clear = confirm_clear.clone();
        let on_update = props.on_update.clone();
        let toast = toast.clone();
        Callback::from(move |_| {
            if !*confirm_clear {
                confirm_clear.set(true);
                if let Some(toast) = &toast {
                    toast.show_info("Click Clear All again within 3 seconds to delete every prediction".to_string());
                }
                let confirm_clear = confirm_clear.clone();
                Timeout::new(CLEAR_CONFIRM_MS, move || confirm_clear.set(false)).forget();
                return;
            }

            confirm_clear.set(false);
            match storage::history_store().clear_history() {
                Ok(()) => {
                    log::info!("Prediction history cleared");
                    if let Some(toast) = &toast {
                        toast.show_success("Prediction history cleared".to_string());
                    }
                    on_update.emit(());
                }
                Err(e) => {
                    log::error!("Failed to clear history: {}", e);
                    if let Some(toast) = &toast {
                        toast.show_error(format!("Failed to clear history: {}", e));
                    }
                }
            }
        })
    };

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <div class="flex flex-wrap justify-between items-center gap-2">
                    <h2 class="card-title">
                        <i class="fas fa-table"></i>
                        {count_label(props.history.len())}
                    </h2>
                    <div class="flex gap-2">
                        <button class="btn btn-sm btn-outline" onclick={on_export}>
                            <i class="fas fa-file-csv"></i>{" Export CSV"}
                        </button>
                        <button
                            class={classes!("btn", "btn-sm", if *confirm_clear { "btn-error" } else { "btn-outline" })}
                            onclick={on_clear}
                        >
                            <i class="fas fa-trash"></i>
                            {if *confirm_clear { " Click again to confirm" } else { " Clear All" }}
                        </button>
                    </div>
                </div>

                <div class="overflow-x-auto">
                    <table class="table">
                        <thead>
                            <tr>
                                <th>{"Date"}</th>
                                <th>{"Result"}</th>
                                <th>{"Probability"}</th>
                                <th>{"Risk"}</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {for props.history.iter().map(|record| {
                                let is_open = expanded.as_deref() == Some(record.id.as_str());
                                html! {
                                    <HistoryRow
                                        key={record.id.clone()}
                                        record={record.clone()}
                                        is_open={is_open}
                                        on_toggle={{
                                            let expanded = expanded.clone();
                                            let id = record.id.clone();
                                            Callback::from(move |_| {
                                                if expanded.as_deref() == Some(id.as_str()) {
                                                    expanded.set(None);
                                                } else {
                                                    expanded.set(Some(id.clone()));
                                                }
                                            })
                                        }}
                                        on_update={props.on_update.clone()}
                                    />
                                }
                            })}
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct HistoryRowProps {
    record: PredictionRecord,
    is_open: bool,
    on_toggle: Callback<()>,
    on_update: Callback<()>,
}

#[function_component(HistoryRow)]
fn history_row(props: &HistoryRowProps) -> Html {
    let toast = use_context::<ToastContext>();
    let record = &props.record;

    let on_toggle = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_: MouseEvent| on_toggle.emit(()))
    };

    let on_delete = {
        let id = record.id.clone();
        let on_update = props.on_update.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            match storage::history_store().delete_from_history(&id) {
                Ok(()) => {
                    log::debug!("Deleted history entry {}", id);
                    on_update.emit(());
                }
                Err(e) => {
                    log::error!("Failed to delete history entry {}: {}", id, e);
                    if let Some(toast) = &toast {
                        toast.show_error(format!("Failed to delete prediction: {}", e));
                    }
                }
            }
        })
    };

    let level = record.result.risk_level;

    html! {
        <>
            <tr class="hover cursor-pointer" onclick={on_toggle}>
                <td>{display_date(record)}</td>
                <td>{common::prediction::outcome_label(record.result.prediction)}</td>
                <td>{common::prediction::format_probability(record.result.probability)}</td>
                <td>
                    <span class={classes!("badge", badge_class(level))}>{format!("{} Risk", level.label())}</span>
                </td>
                <td class="text-right">
                    <button class="btn btn-ghost btn-xs" aria-label="Delete" onclick={on_delete}>
                        <i class="fas fa-trash"></i>
                    </button>
                    <i class={if props.is_open { "fas fa-chevron-up" } else { "fas fa-chevron-down" }}></i>
                </td>
            </tr>
            {if props.is_open {
                html! {
                    <tr>
                        <td colspan="5" class="bg-base-200">
                            <div class="grid grid-cols-2 md:grid-cols-4 gap-3">
                                {for FormField::ALL.iter().map(|field| html! {
                                    <div>
                                        <div class="text-xs text-base-content/60">{field.label()}</div>
                                        <div class="font-semibold">{record.input.get(*field).to_string()}</div>
                                    </div>
                                })}
                            </div>
                        </td>
                    </tr>
                }
            } else {
                html! {}
            }}
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_label() {
        assert_eq!(count_label(1), "1 prediction saved");
        assert_eq!(count_label(3), "3 predictions saved");
    }

    #[test]
    fn test_unparseable_date_shown_as_stored() {
        let record = PredictionRecord {
            id: "abc".to_string(),
            timestamp: "yesterday".to_string(),
            input: common::PredictionInput::default(),
            result: common::RecordedResult {
                prediction: 0,
                probability: 0.1,
                risk_level: RiskLevel::Low,
            },
        };
        assert_eq!(display_date(&record), "yesterday");
    }
}
