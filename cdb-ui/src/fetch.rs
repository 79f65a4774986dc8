//! `HttpTransport` over the browser's `fetch`.

use crate::js_bridge::js_error;
use async_trait::async_trait;
use cdb_api::{ApiError, HttpReply, HttpTransport, Result};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, HtmlFormElement, RequestInit, Response};

#[derive(Debug, Default, Clone, Copy)]
pub struct WebTransport;

fn transport_error(url: &str, reason: impl Into<String>) -> ApiError {
    ApiError::Transport {
        url: url.to_string(),
        reason: reason.into(),
    }
}

impl WebTransport {
    async fn send(&self, url: &str, init: &RequestInit) -> Result<HttpReply> {
        let window = web_sys::window().ok_or_else(|| transport_error(url, "no window"))?;
        let response = JsFuture::from(window.fetch_with_str_and_init(url, init))
            .await
            .map_err(|e| transport_error(url, js_error(&e)))?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| transport_error(url, "fetch did not return a Response"))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|e| transport_error(url, js_error(&e)))?;
        let body = JsFuture::from(text)
            .await
            .map_err(|e| transport_error(url, js_error(&e)))?
            .as_string()
            .unwrap_or_default();
        Ok(HttpReply::new(status, body))
    }
}

#[async_trait(?Send)]
impl HttpTransport for WebTransport {
    type Form = FormData;

    async fn get(&self, url: &str) -> Result<HttpReply> {
        let init = RequestInit::new();
        init.set_method("GET");
        self.send(url, &init).await
    }

    async fn post_form(&self, url: &str, form: FormData) -> Result<HttpReply> {
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&form.into());
        self.send(url, &init).await
    }
}

/// Multipart body of the `<form>` with the given id, file inputs included.
pub fn form_data(form_id: &str) -> Option<FormData> {
    let form = web_sys::window()?
        .document()?
        .get_element_by_id(form_id)?
        .dyn_into::<HtmlFormElement>()
        .ok()?;
    FormData::new_with_form(&form).ok()
}
