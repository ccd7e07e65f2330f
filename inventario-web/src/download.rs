//! Browser file plumbing: saving downloaded documents, reading picked files
//! and previewing them through object URLs.

use gloo_timers::callback::Timeout;
use js_sys::{Array, Uint8Array};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, HtmlAnchorElement, Url};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BrowserFileError {
    #[error("browser window unavailable")]
    NoWindow,
    #[error("{0}")]
    Js(String),
}

fn js_error(context: &str, err: &JsValue) -> BrowserFileError {
    BrowserFileError::Js(format!("{context}: {err:?}"))
}

/// How long a download URL outlives the click that started the download.
const DOWNLOAD_URL_TTL_MS: u32 = 60_000;

/// Offer `bytes` to the user as a file named `file_name`.
pub fn save_bytes(bytes: &[u8], file_name: &str, mime_type: &str) -> Result<(), BrowserFileError> {
    let url = blob_url(bytes, mime_type)?;
    let result = click_download(&url, file_name);
    revoke_later(url);
    result
}

fn blob_url(bytes: &[u8], mime_type: &str) -> Result<String, BrowserFileError> {
    let parts = Array::new();
    parts.push(&Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|err| js_error("blob creation failed", &err))?;
    Url::create_object_url_with_blob(&blob).map_err(|err| js_error("object url failed", &err))
}

/// Revoke `url` once the browser has had time to start reading it.
fn revoke_later(url: String) {
    Timeout::new(DOWNLOAD_URL_TTL_MS, move || revoke_object_url(&url)).forget();
}

fn click_download(url: &str, file_name: &str) -> Result<(), BrowserFileError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(BrowserFileError::NoWindow)?;
    let body = document.body().ok_or(BrowserFileError::NoWindow)?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|err| js_error("anchor creation failed", &err))?
        .dyn_into()
        .map_err(|err| js_error("anchor cast failed", &err))?;
    anchor.set_href(url);
    anchor.set_download(file_name);
    anchor.set_hidden(true);
    body.append_child(&anchor)
        .map_err(|err| js_error("anchor insert failed", &err))?;
    anchor.click();
    anchor.remove();
    Ok(())
}

/// Whole contents of a picked file.
pub async fn read_file(file: &File) -> Result<Vec<u8>, BrowserFileError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|err| js_error("file read failed", &err))?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

/// Temporary URL for previewing `file`. Release it with [`revoke_object_url`].
pub fn object_url(file: &File) -> Result<String, BrowserFileError> {
    Url::create_object_url_with_blob(file).map_err(|err| js_error("object url failed", &err))
}

pub fn revoke_object_url(url: &str) {
    if let Err(err) = Url::revoke_object_url(url) {
        log::debug!("object url not revoked: {err:?}");
    }
}
