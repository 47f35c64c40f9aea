use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::{
    session::{InputField, OperationKind, SubmissionState},
    utils::abbreviate_hex,
};

/// One of the transfer, burn and mint forms. The input text lives in the controller's session,
/// so the form itself keeps no state.
pub struct OperationForm;

pub enum Msg {
    Input(InputField, String),
    Submit,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub kind: OperationKind,
    pub amount: String,
    /// Only the transfer form has a destination field.
    #[prop_or_default]
    pub destination: Option<String>,
    pub placeholder: String,
    pub state: SubmissionState,
    pub on_input: Callback<(InputField, String)>,
    pub on_submit: Callback<OperationKind>,
}

fn amount_field(kind: OperationKind) -> InputField {
    match kind {
        OperationKind::Transfer => InputField::TransferAmount,
        OperationKind::Burn => InputField::BurnAmount,
        OperationKind::Mint => InputField::MintAmount,
    }
}

fn button_label(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Transfer => "Transfer Tokens",
        OperationKind::Burn => "Burn Tokens",
        OperationKind::Mint => "Mint Tokens",
    }
}

fn status_line(state: &SubmissionState) -> Option<String> {
    match state {
        SubmissionState::Idle => None,
        SubmissionState::Built => Some("Waiting for wallet...".to_string()),
        SubmissionState::Sent(hash) => Some(format!(
            "Pending {}",
            abbreviate_hex(&hash.to_string())
        )),
        SubmissionState::Confirmed(hash) => Some(format!(
            "Confirmed {}",
            abbreviate_hex(&hash.to_string())
        )),
        SubmissionState::Failed(reason) => Some(format!("Failed: {reason}")),
    }
}

impl Component for OperationForm {
    type Message = Msg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let props = ctx.props();
        match msg {
            Msg::Input(field, value) => props.on_input.emit((field, value)),
            Msg::Submit => props.on_submit.emit(props.kind),
        }
        false
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let busy = props.state.is_in_flight();

        let field = amount_field(props.kind);
        let on_amount = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::Input(field, input.value())
        });
        let on_destination = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::Input(InputField::Destination, input.value())
        });
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        html! {
            <form class="operation-form" {onsubmit}>
                if let Some(destination) = &props.destination {
                    <input
                        type="text"
                        name="walletAddress"
                        placeholder="Wallet Address"
                        value={destination.clone()}
                        oninput={on_destination}
                        disabled={busy}
                    />
                }
                <input
                    type="text"
                    placeholder={props.placeholder.clone()}
                    value={props.amount.clone()}
                    oninput={on_amount}
                    disabled={busy}
                />
                <button type="submit" disabled={busy}>
                    if busy {
                        {"Processing..."}
                    } else {
                        {button_label(props.kind)}
                    }
                </button>
                if let Some(status) = status_line(&props.state) {
                    <div class="status-message">
                        {status}
                    </div>
                }
            </form>
        }
    }
}
