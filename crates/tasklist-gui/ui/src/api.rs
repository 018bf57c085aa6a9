use serde::{Serialize, de::DeserializeOwned};
use tasklist_core::GatewayError;
use tauri_wasm::{args, invoke};

pub async fn invoke_tauri<R, A>(cmd: &str, args_payload: &A) -> Result<R, GatewayError>
where
    R: DeserializeOwned,
    A: Serialize + ?Sized,
{
    let payload = args(args_payload).map_err(|e| GatewayError::Encode(e.to_string()))?;
    let value = invoke(cmd)
        .with_args(payload)
        .await
        .map_err(|e| GatewayError::Invoke(format!("{e:?}")))?;

    serde_wasm_bindgen::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))
}
