//! Host SDK bindings resolved at call time from `window.miro`.
//!
//! # Design
//! - Look the SDK up by property path so a missing SDK is an error, not a panic.
//! - Every SDK call may return a promise; results are always awaited.

use async_trait::async_trait;
use docboard_core::HostError;
use docboard_core::ports::{BoardHost, BoardInfo};
use gloo::console;
use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

const BOARD: &[&str] = &["miro", "board"];
const NOTIFICATIONS: &[&str] = &["miro", "board", "notifications"];

/// Board host backed by the injected Miro SDK.
pub(crate) struct MiroHost;

#[async_trait(?Send)]
impl BoardHost for MiroHost {
    async fn board_info(&self) -> Result<BoardInfo, HostError> {
        let info = call(BOARD, "getInfo", &Array::new()).await?;
        let id = Reflect::get(&info, &JsValue::from_str("id"))
            .ok()
            .and_then(|id| id.as_string())
            .ok_or_else(|| HostError::CallFailed {
                call: "getInfo",
                detail: "board id missing".into(),
            })?;
        Ok(BoardInfo { id })
    }

    async fn id_token(&self) -> Result<String, HostError> {
        call(BOARD, "getIdToken", &Array::new())
            .await?
            .as_string()
            .ok_or_else(|| HostError::CallFailed {
                call: "getIdToken",
                detail: "token is not a string".into(),
            })
    }

    fn show_error(&self, message: &str) {
        let args = Array::of1(&JsValue::from_str(message));
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = call(NOTIFICATIONS, "showError", &args).await {
                console::error!(format!("host notification failed: {err}"));
            }
        });
    }
}

fn lookup(path: &[&str]) -> Result<JsValue, HostError> {
    let mut node = JsValue::from(gloo::utils::window());
    for segment in path {
        node = Reflect::get(&node, &JsValue::from_str(segment)).map_err(|_| HostError::Unavailable)?;
        if node.is_undefined() || node.is_null() {
            return Err(HostError::Unavailable);
        }
    }
    Ok(node)
}

async fn call(path: &[&str], method: &'static str, args: &Array) -> Result<JsValue, HostError> {
    let target = lookup(path)?;
    let function: Function = Reflect::get(&target, &JsValue::from_str(method))
        .map_err(|_| HostError::Unavailable)?
        .dyn_into()
        .map_err(|_| HostError::Unavailable)?;
    let result = function
        .apply(&target, args)
        .map_err(|err| call_failed(method, &err))?;
    JsFuture::from(Promise::resolve(&result))
        .await
        .map_err(|err| call_failed(method, &err))
}

fn call_failed(call: &'static str, err: &JsValue) -> HostError {
    HostError::CallFailed {
        call,
        detail: err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}
