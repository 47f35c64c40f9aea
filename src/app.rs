use std::rc::Rc;

use yew::prelude::*;

use crate::{
    components::{operation_form::OperationForm, wallet::WalletConnect},
    config::Config,
    controller::TokenController,
    provider::InjectedProvider,
    session::{InputField, OperationKind, SessionState},
    timer::BrowserTimer,
    utils::amount_placeholder,
};

type BrowserController = TokenController<InjectedProvider, BrowserTimer>;

pub struct App {
    controller: Rc<BrowserController>,
    session: SessionState,
}

pub enum Msg {
    SessionChanged,
    Connect,
    Input(InputField, String),
    Submit(OperationKind),
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub config: Config,
}

impl Component for App {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let config = ctx.props().config.clone();
        let poll_interval = config.poll_interval;
        let controller = Rc::new(TokenController::detecting(
            move || InjectedProvider::detect(poll_interval),
            BrowserTimer,
            config,
        ));

        let changed = ctx.link().callback(|()| Msg::SessionChanged);
        controller.on_change(move || changed.emit(()));

        let loader = controller.clone();
        wasm_bindgen_futures::spawn_local(async move {
            loader.load().await;
        });

        Self {
            session: controller.session(),
            controller,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SessionChanged => {
                self.session = self.controller.session();
                true
            }
            Msg::Connect => {
                let controller = self.controller.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let _ = controller.connect().await;
                });
                false
            }
            Msg::Input(field, value) => {
                self.controller.set_input(field, value);
                false
            }
            Msg::Submit(kind) => {
                let controller = self.controller.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let _ = controller.submit_pending(kind).await;
                });
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let session = &self.session;
        let input = session.input();
        let (name, symbol, owner) = match session.facts() {
            Some(facts) => (
                facts.name.clone(),
                facts.symbol.clone(),
                facts.owner.to_string(),
            ),
            None => Default::default(),
        };
        let supply = session
            .supply()
            .map(|supply| supply.to_string())
            .unwrap_or_else(|| "0".to_string());
        let placeholder = amount_placeholder(&symbol);

        let on_connect = ctx.link().callback(|()| Msg::Connect);
        let on_input = ctx
            .link()
            .callback(|(field, value): (InputField, String)| Msg::Input(field, value));
        let on_submit = ctx.link().callback(Msg::Submit);

        html! {
            <main class="container">
                <h2 class="headline">{"Zimp Coin"}</h2>
                if let Some(fault) = session.fault() {
                    <p class="fault">{fault.message.clone()}</p>
                }
                <div class="token-info">
                    <span><strong>{"Coin: "}</strong>{name}</span>
                    <span><strong>{"Ticker: "}</strong>{symbol}</span>
                    <span><strong>{"Total Supply: "}</strong>{supply}</span>
                </div>
                <OperationForm
                    kind={OperationKind::Transfer}
                    destination={Some(input.destination.clone())}
                    amount={input.transfer_amount.clone()}
                    placeholder={placeholder.clone()}
                    state={session.submission(OperationKind::Transfer).clone()}
                    on_input={on_input.clone()}
                    on_submit={on_submit.clone()}
                />
                if session.is_owner() {
                    <section class="owner-actions">
                        <OperationForm
                            kind={OperationKind::Burn}
                            amount={input.burn_amount.clone()}
                            placeholder={placeholder.clone()}
                            state={session.submission(OperationKind::Burn).clone()}
                            on_input={on_input.clone()}
                            on_submit={on_submit.clone()}
                        />
                        <OperationForm
                            kind={OperationKind::Mint}
                            amount={input.mint_amount.clone()}
                            placeholder={placeholder}
                            state={session.submission(OperationKind::Mint).clone()}
                            on_input={on_input}
                            on_submit={on_submit}
                        />
                    </section>
                }
                <p><strong>{"Contract Address: "}</strong>{self.controller.contract_address().to_string()}</p>
                <p><strong>{"Token Owner Address: "}</strong>{owner}</p>
                <WalletConnect account={session.account()} {on_connect} />
            </main>
        }
    }
}
