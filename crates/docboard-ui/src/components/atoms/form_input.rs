//! Labelled text input with an inline error message.
//!
//! # Design
//! - Stateless: the caller owns the value and receives raw strings on input/blur.

use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct FormInputProps {
    pub label: AttrValue,
    pub name: AttrValue,
    pub value: AttrValue,
    #[prop_or(AttrValue::Static("text"))]
    pub kind: AttrValue,
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub required: bool,
    #[prop_or_default]
    pub oninput: Callback<String>,
    #[prop_or_default]
    pub onblur: Callback<String>,
}

#[function_component(FormInput)]
pub(crate) fn form_input(props: &FormInputProps) -> Html {
    let oninput = {
        let oninput = props.oninput.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                oninput.emit(input.value());
            }
        })
    };
    let onblur = {
        let onblur = props.onblur.clone();
        Callback::from(move |event: FocusEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                onblur.emit(input.value());
            }
        })
    };
    let id = format!("field-{}", props.name);
    let invalid = props.error.is_some();

    html! {
        <div class={classes!("form-input", invalid.then_some("form-input--invalid"))}>
            <label class="form-input__label" for={id.clone()}>
                { props.label.clone() }
                if props.required {
                    <span class="form-input__required">{"*"}</span>
                }
            </label>
            <input
                id={id}
                class="form-input__field"
                name={props.name.clone()}
                type={props.kind.clone()}
                value={props.value.clone()}
                disabled={props.disabled}
                required={props.required}
                autocomplete="off"
                aria-invalid={invalid.to_string()}
                {oninput}
                {onblur}
            />
            if let Some(error) = props.error.clone() {
                <p class="form-input__error">{ error }</p>
            }
        </div>
    }
}
