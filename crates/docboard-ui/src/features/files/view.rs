//! Document searchbar.
//!
//! # Design
//! - Keep local input state for immediate typing feedback.
//! - Push the query to the shared store after a pause; replacing the timer
//!   drops (cancels) the previous one.

use crate::core::store::{AppStore, app_dispatch};
use docboard_core::files::{SEARCH_DEBOUNCE, SearchInput};
use docboard_core::i18n::{DEFAULT_LOCALE, TranslationBundle};
use gloo_timers::callback::Timeout;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(Searchbar)]
pub(crate) fn searchbar() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let files = use_selector(|store: &AppStore| store.files.clone());
    let dispatch = app_dispatch();
    let input = {
        let initial = files.search_query.clone();
        use_mut_ref(move || SearchInput::new(&initial))
    };
    let timer = use_mut_ref(|| None as Option<Timeout>);
    let redraw = use_force_update();
    let disabled = files.search_disabled();

    {
        let input = input.clone();
        let timer = timer.clone();
        use_effect_with_deps(
            move |_| {
                move || {
                    timer.borrow_mut().take();
                    input.borrow_mut().cancel();
                }
            },
            (),
        );
    }

    let oninput = {
        let input = input.clone();
        let timer = timer.clone();
        let dispatch = dispatch.clone();
        let redraw = redraw.clone();
        Callback::from(move |event: InputEvent| {
            let Some(element) = event.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let ticket = input.borrow_mut().input(&element.value());
            redraw.force_update();

            let input = input.clone();
            let dispatch = dispatch.clone();
            let millis = u32::try_from(SEARCH_DEBOUNCE.as_millis()).unwrap_or(u32::MAX);
            *timer.borrow_mut() = Some(Timeout::new(millis, move || {
                let query = input.borrow_mut().elapse(ticket);
                if let Some(query) = query {
                    dispatch.reduce_mut(|store| {
                        store.set_search_query(query);
                    });
                }
            }));
        })
    };

    let onclear = {
        let input = input.clone();
        Callback::from(move |_: MouseEvent| {
            timer.borrow_mut().take();
            input.borrow_mut().clear();
            dispatch.reduce_mut(|store| {
                store.set_search_query(String::new());
            });
            redraw.force_update();
        })
    };

    let (value, has_query) = {
        let input = input.borrow();
        (input.local_query().to_string(), input.has_query())
    };

    html! {
        <div class={classes!("searchbar", disabled.then_some("searchbar--disabled"))}>
            <span class="searchbar__icon" aria-hidden="true"></span>
            <input
                class="searchbar__input"
                type="text"
                placeholder={bundle.text("features.file.search.placeholder", "Search")}
                value={value}
                disabled={disabled}
                {oninput}
            />
            if has_query {
                <button
                    type="button"
                    class="searchbar__clear"
                    aria-label={bundle.text("features.file.search.clear", "Clear")}
                    disabled={disabled}
                    onclick={onclear}>
                    {"×"}
                </button>
            }
        </div>
    }
}
