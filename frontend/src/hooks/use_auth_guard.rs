use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

/// Redirect to the login page when the session is not authenticated.
///
/// The check is advisory: a transport failure is logged and the page keeps
/// working, only an explicit "not authenticated" answer redirects.
#[hook]
pub fn use_auth_guard(api_client: &ApiClient) {
    use_effect_with((), {
        let api_client = api_client.clone();
        move |_| {
            spawn_local(async move {
                match api_client.check_auth().await {
                    Ok(true) => {}
                    Ok(false) => {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href("/cabinet");
                        }
                    }
                    Err(e) => {
                        gloo::console::warn!(format!("Auth check failed: {}", e));
                    }
                }
            });

            || ()
        }
    });
}
