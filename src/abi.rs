//! The contract artifact shipped with the app.
//!
//! The calls themselves are encoded from the `sol!` interface in [`crate::contract`]; the artifact
//! is only used to check at startup that the deployed contract really exposes every entry point
//! the app is going to call.

use alloy_sol_types::SolCall;
use serde::Deserialize;

use crate::{contract::IZimpToken, error::Error};

const BUNDLED_ARTIFACT: &str = include_str!("../abi/Zimp.json");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub abi: Vec<AbiItem>,
}

#[derive(Debug, Deserialize)]
pub struct AbiItem {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
}

#[derive(Debug, Deserialize)]
pub struct AbiParam {
    #[serde(rename = "type")]
    pub kind: String,
}

impl AbiItem {
    /// Canonical signature such as `transfer(address,uint256)`, for function items.
    pub fn signature(&self) -> Option<String> {
        if self.kind != "function" {
            return None;
        }
        let name = self.name.as_deref()?;
        let params = self
            .inputs
            .iter()
            .map(|param| param.kind.as_str())
            .collect::<Vec<_>>()
            .join(",");
        Some(format!("{name}({params})"))
    }
}

impl Artifact {
    pub fn parse(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn bundled() -> Result<Self, Error> {
        Self::parse(BUNDLED_ARTIFACT)
    }

    fn require<C: SolCall>(&self) -> Result<(), Error> {
        let found = self
            .abi
            .iter()
            .filter_map(AbiItem::signature)
            .any(|signature| signature == C::SIGNATURE);
        if found {
            Ok(())
        } else {
            Err(Error::MissingAbiEntry(C::SIGNATURE))
        }
    }

    /// Fails on the first entry point the app calls that the artifact does not declare.
    pub fn ensure_token_surface(&self) -> Result<(), Error> {
        self.require::<IZimpToken::nameCall>()?;
        self.require::<IZimpToken::symbolCall>()?;
        self.require::<IZimpToken::ownerCall>()?;
        self.require::<IZimpToken::totalSupplyCall>()?;
        self.require::<IZimpToken::transferCall>()?;
        self.require::<IZimpToken::burnCall>()?;
        self.require::<IZimpToken::mintCall>()?;
        log::debug!("ABI of {} covers every token entry point", self.contract_name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_artifact_covers_token_surface() {
        let artifact = Artifact::bundled().unwrap();
        assert_eq!(artifact.contract_name, "Zimp");
        artifact.ensure_token_surface().unwrap();
    }

    #[test]
    fn reports_missing_entry_point() {
        let artifact = Artifact::parse(
            r#"{
                "contractName": "Partial",
                "abi": [
                    { "type": "function", "name": "name", "inputs": [] },
                    { "type": "function", "name": "symbol", "inputs": [] },
                    { "type": "function", "name": "owner", "inputs": [] },
                    { "type": "function", "name": "totalSupply", "inputs": [] },
                    { "type": "function", "name": "transfer",
                      "inputs": [{ "type": "address" }, { "type": "uint256" }] },
                    { "type": "event", "name": "burn", "inputs": [{ "type": "uint256" }] }
                ]
            }"#,
        )
        .unwrap();

        match artifact.ensure_token_surface() {
            Err(Error::MissingAbiEntry(signature)) => assert_eq!(signature, "burn(uint256)"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_artifact() {
        assert!(matches!(Artifact::parse("{"), Err(Error::Json(_))));
    }
}
