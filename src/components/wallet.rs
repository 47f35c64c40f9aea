use alloy_primitives::Address;
use yew::prelude::*;

pub struct WalletConnect;

pub enum Msg {
    Connect,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub account: Option<Address>,
    pub on_connect: Callback<()>,
}

impl Component for WalletConnect {
    type Message = Msg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Connect => {
                ctx.props().on_connect.emit(());
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onclick = ctx.link().callback(|_| Msg::Connect);
        let account = ctx.props().account;

        html! {
            <div class="wallet-section">
                if let Some(account) = account {
                    <p class="wallet-address">
                        <strong>{"Your Wallet Address: "}</strong>
                        {account.to_string()}
                    </p>
                }
                <button class="connect-button" {onclick}>
                    if account.is_some() {
                        {"Wallet Connected \u{1f512}"}
                    } else {
                        {"Connect Wallet \u{1f511}"}
                    }
                </button>
            </div>
        }
    }
}
