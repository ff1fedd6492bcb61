use common::fields::{self, FieldErrors, FormField};
use common::PredictionInput;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PredictionFormProps {
    pub on_submit: Callback<PredictionInput>,
    pub is_loading: bool,
}

fn field_icon(field: FormField) -> &'static str {
    match field {
        FormField::Pregnancies => "fas fa-baby",
        FormField::Glucose => "fas fa-tint",
        FormField::BloodPressure => "fas fa-heart",
        FormField::SkinThickness => "fas fa-ruler",
        FormField::Insulin => "fas fa-syringe",
        FormField::Bmi => "fas fa-weight",
        FormField::DiabetesPedigree => "fas fa-dna",
        FormField::Age => "fas fa-calendar",
    }
}

/// Applies a field change: stores the value and refreshes that field's error.
fn apply_change(
    values: &PredictionInput,
    errors: &FieldErrors,
    field: FormField,
    value: f64,
) -> (PredictionInput, FieldErrors) {
    let values = values.with(field, value);
    let mut errors = errors.clone();
    match fields::validate_field(field, value) {
        Some(message) => {
            errors.insert(field, message);
        }
        None => {
            errors.remove(&field);
        }
    }
    (values, errors)
}

#[function_component(PredictionForm)]
pub fn prediction_form(props: &PredictionFormProps) -> Html {
    let values = use_state(PredictionInput::default);
    let errors = use_state(FieldErrors::new);
    let tooltip = use_state(|| None::<FormField>);

    let on_change = {
        let values = values.clone();
        let errors = errors.clone();
        Callback::from(move |(field, value): (FormField, f64)| {
            let (new_values, new_errors) = apply_change(&values, &errors, field, value);
            values.set(new_values);
            errors.set(new_errors);
        })
    };

    let on_submit = {
        let values = values.clone();
        let errors = errors.clone();
        let on_submit = props.on_submit.clone();
        let is_loading = props.is_loading;

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if is_loading {
                log::debug!("Submit ignored, a prediction is already in flight");
                return;
            }

            match fields::validate_input(&values) {
                Ok(()) => {
                    errors.set(FieldErrors::new());
                    on_submit.emit(*values);
                }
                Err(field_errors) => {
                    log::info!("Form has {} invalid field(s)", field_errors.len());
                    errors.set(field_errors);
                }
            }
        })
    };

    let fill_sample = {
        let values = values.clone();
        let errors = errors.clone();
        Callback::from(move |_| {
            log::debug!("Filling form with sample data");
            values.set(PredictionInput::sample());
            errors.set(FieldErrors::new());
        })
    };

    let reset_form = {
        let values = values.clone();
        let errors = errors.clone();
        Callback::from(move |_| {
            log::debug!("Resetting form");
            values.set(PredictionInput::default());
            errors.set(FieldErrors::new());
        })
    };

    html! {
        <form onsubmit={on_submit} class="space-y-6">
            <div class="flex flex-wrap gap-3 justify-center">
                <button type="button" class="btn btn-outline btn-primary btn-sm" onclick={fill_sample}>
                    <i class="fas fa-magic"></i>{" Fill Sample Data"}
                </button>
                <button type="button" class="btn btn-ghost btn-sm" onclick={reset_form}>
                    <i class="fas fa-undo"></i>{" Reset Form"}
                </button>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                { for FormField::ALL.iter().map(|&field| {
                    let config = field.config();
                    let value = values.get(field);
                    let error = errors.get(&field).cloned();

                    let on_input = {
                        let on_change = on_change.clone();
                        Callback::from(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            on_change.emit((field, fields::parse_field_value(&input.value())));
                        })
                    };
                    let show_tip = {
                        let tooltip = tooltip.clone();
                        Callback::from(move |_| tooltip.set(Some(field)))
                    };
                    let hide_tip = {
                        let tooltip = tooltip.clone();
                        Callback::from(move |_| tooltip.set(None))
                    };

                    html! {
                        <div key={config.key} class="form-control space-y-2">
                            <div class="flex items-center justify-between">
                                <label class="label gap-2">
                                    <span class="label-text font-medium">
                                        <i class={classes!(field_icon(field), "text-primary", "mr-2")}></i>
                                        {config.label}
                                        if !config.unit.is_empty() {
                                            <span class="text-xs text-gray-400">{format!(" ({})", config.unit)}</span>
                                        }
                                    </span>
                                </label>
                                <div class={classes!("tooltip", "tooltip-left", (*tooltip == Some(field)).then_some("tooltip-open"))}
                                     data-tip={config.tooltip}>
                                    <button type="button" class="btn btn-ghost btn-circle btn-xs"
                                            onmouseenter={show_tip} onmouseleave={hide_tip}>
                                        <i class="fas fa-info-circle text-gray-400"></i>
                                    </button>
                                </div>
                            </div>

                            <input
                                type="range"
                                class="range range-primary range-sm"
                                min={config.min.to_string()}
                                max={config.max.to_string()}
                                step={config.step.to_string()}
                                value={value.to_string()}
                                oninput={on_input.clone()}
                            />
                            <input
                                id={config.key}
                                type="number"
                                class={classes!("input", "input-bordered", "w-full", "text-center", error.is_some().then_some("input-error"))}
                                min={config.min.to_string()}
                                max={config.max.to_string()}
                                step={config.step.to_string()}
                                value={value.to_string()}
                                oninput={on_input}
                            />

                            if let Some(message) = error {
                                <p class="text-xs text-error">{message}</p>
                            }

                            <div class="flex justify-between text-xs text-gray-400">
                                <span>{config.min.to_string()}</span>
                                <span>{config.max.to_string()}</span>
                            </div>
                        </div>
                    }
                }) }
            </div>

            <button type="submit" class="btn btn-primary w-full btn-lg" disabled={props.is_loading}>
                {if props.is_loading {
                    html! { <><span class="loading loading-spinner loading-sm"></span>{" Analyzing Your Data..."}</> }
                } else {
                    html! { <><i class="fas fa-magic"></i>{" Get Prediction"}</> }
                }}
            </button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_sets_and_clears_field_error() {
        let values = PredictionInput::default();
        let errors = FieldErrors::new();

        let (values, errors) = apply_change(&values, &errors, FormField::Glucose, 250.0);
        assert_eq!(values.glucose, 250.0);
        assert_eq!(errors[&FormField::Glucose], "Maximum value is 200");

        let (values, errors) = apply_change(&values, &errors, FormField::Glucose, 120.0);
        assert_eq!(values.glucose, 120.0);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_change_keeps_other_errors() {
        let (values, errors) =
            apply_change(&PredictionInput::default(), &FieldErrors::new(), FormField::Age, 10.0);
        let (_, errors) = apply_change(&values, &errors, FormField::Bmi, 30.0);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key(&FormField::Age));
    }
}
