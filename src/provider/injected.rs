use std::time::Duration;

use alloy_primitives::{Address, Bytes, TxHash, U64};
use async_trait::async_trait;
use gloo_utils::format::JsValueSerdeExt;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use wasm_bindgen::{prelude::*, JsCast};

use super::{TransactionReceipt, TransactionRequest, WalletProvider};
use crate::error::Error;

#[wasm_bindgen]
extern "C" {
    /// EIP-1193 provider object injected by MetaMask and friends as `window.ethereum`.
    #[wasm_bindgen(typescript_type = "EIP1193Provider")]
    pub type Eip1193Provider;

    #[wasm_bindgen(catch, method)]
    async fn request(this: &Eip1193Provider, args: JsValue) -> Result<JsValue, JsValue>;
}

#[derive(Serialize)]
struct RequestArguments<'a> {
    method: &'a str,
    params: Value,
}

pub struct InjectedProvider {
    ethereum: Eip1193Provider,
    poll_interval: Duration,
}

impl InjectedProvider {
    /// Looks for `window.ethereum`. `None` means no wallet extension is installed.
    pub fn detect(poll_interval: Duration) -> Option<Self> {
        let window = web_sys::window()?;
        let ethereum = js_sys::Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if ethereum.is_undefined() || ethereum.is_null() {
            log::warn!("No Metamask detected");
            return None;
        }
        Some(Self {
            ethereum: ethereum.unchecked_into(),
            poll_interval,
        })
    }

    async fn rpc<T: DeserializeOwned>(&self, method: &'static str, params: Value) -> Result<T, Error> {
        log::debug!("{method} {params}");
        let args = JsValue::from_serde(&RequestArguments { method, params })?;
        let result = self
            .ethereum
            .request(args)
            .await
            .map_err(|err| rpc_error(method, &err))?;
        result.into_serde().map_err(|err| Error::MalformedResponse {
            method,
            reason: err.to_string(),
        })
    }
}

/// Provider errors are plain JS objects carrying `code` and `message`.
fn rpc_error(method: &'static str, err: &JsValue) -> Error {
    let field = |name: &str| js_sys::Reflect::get(err, &JsValue::from_str(name)).ok();
    let code = field("code").and_then(|code| code.as_f64());
    let message = field("message")
        .and_then(|message| message.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"));
    provider_error(method, code, message)
}

/// Errors thrown without a numeric `code` get `-1`.
fn provider_error(method: &'static str, code: Option<f64>, message: String) -> Error {
    Error::Rpc {
        method,
        code: code.filter(|code| code.is_finite()).map_or(-1, |code| code as i64),
        message,
    }
}

/// Blocks on top of `included`, counting the including block itself.
fn confirmation_depth(head: U64, included: U64) -> u64 {
    head.saturating_sub(included).saturating_to::<u64>().saturating_add(1)
}

#[async_trait(?Send)]
impl WalletProvider for InjectedProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, Error> {
        self.rpc("eth_requestAccounts", json!([])).await
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, Error> {
        self.rpc("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<TxHash, Error> {
        self.rpc("eth_sendTransaction", json!([request])).await
    }

    async fn wait_for_confirmation(
        &self,
        hash: TxHash,
        confirmations: u64,
    ) -> Result<TransactionReceipt, Error> {
        loop {
            let receipt: Option<TransactionReceipt> =
                self.rpc("eth_getTransactionReceipt", json!([hash])).await?;
            if let Some(receipt) = receipt {
                if let Some(included) = receipt.block_number {
                    if confirmations <= 1 {
                        return Ok(receipt);
                    }
                    let head: U64 = self.rpc("eth_blockNumber", json!([])).await?;
                    if confirmation_depth(head, included) >= confirmations {
                        return Ok(receipt);
                    }
                }
            }
            gloo_timers::future::sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismissed_prompt_is_a_user_rejection() {
        let err = provider_error(
            "eth_sendTransaction",
            Some(4001.0),
            "MetaMask Tx Signature: User denied transaction signature.".to_string(),
        );
        assert!(err.is_user_rejection());
        assert!(matches!(
            err,
            Error::Rpc {
                method: "eth_sendTransaction",
                code: 4001,
                ..
            }
        ));
    }

    #[test]
    fn other_provider_errors_are_not_rejections() {
        let internal = provider_error("eth_call", Some(-32603.0), "execution reverted".to_string());
        assert!(!internal.is_user_rejection());

        let thrown = provider_error("eth_requestAccounts", None, "boom".to_string());
        assert!(matches!(thrown, Error::Rpc { code: -1, .. }));
        assert!(!thrown.is_user_rejection());

        let garbled = provider_error("eth_requestAccounts", Some(f64::NAN), "?".to_string());
        assert!(matches!(garbled, Error::Rpc { code: -1, .. }));
    }

    #[test]
    fn depth_counts_the_including_block() {
        assert_eq!(confirmation_depth(U64::from(100), U64::from(100)), 1);
        assert_eq!(confirmation_depth(U64::from(102), U64::from(100)), 3);
        // A lagging node can report a head behind the receipt.
        assert_eq!(confirmation_depth(U64::from(99), U64::from(100)), 1);
    }
}
