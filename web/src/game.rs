use crate::input::{KeyAction, key_action, suppresses_default};
use crate::settings::{self, HighScore, Settings};
use crate::ticker::Ticker;
use crate::utils::*;
use bitflags::bitflags;
use clap::Args;
use cutesnake_core as game;
use game::ToNdIndex;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use ndarray::Array2;
use wasm_bindgen::JsCast;
use yew::prelude::*;

const EAT_FLASH_MS: u32 = 200;
const GAME_OVER_FLASH_MS: u32 = 500;

bitflags! {
    /// Short-lived animation classes on the board.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub(crate) struct Effects: u8 {
        const EATING    = 1;
        const GAME_OVER = 1 << 1;
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Start,
    Turn(game::Direction),
    Tick,
    UpdateSettings(Settings),
    ClearEffects(Effects),
}

impl From<KeyAction> for Msg {
    fn from(action: KeyAction) -> Self {
        match action {
            KeyAction::Turn(direction) => Msg::Turn(direction),
            KeyAction::Start => Msg::Start,
        }
    }
}

fn cell_classes(cell: game::BoardCell) -> Classes {
    use game::BoardCell::*;

    match cell {
        Empty => classes!("cell"),
        Food(_) => classes!("cell", "food"),
        Head(direction) => classes!("cell", "head", format!("dir-{}", direction)),
        Body { index, .. } => classes!("cell", "body", has_heart(index).then_some("heart")),
    }
}

/// Segments fade towards the tail, down to 70% at the very end.
fn body_opacity(index: game::CellCount, len: game::CellCount) -> f32 {
    if len == 0 {
        return 1.0;
    }
    1.0 - (f32::from(index) / f32::from(len)) * 0.3
}

const fn has_heart(index: game::CellCount) -> bool {
    index % 3 == 0
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    cell: game::BoardCell,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    use game::BoardCell::*;

    let class = cell_classes(props.cell);
    match props.cell {
        Empty | Head(_) => html! { <td {class}/> },
        Food(kind) => html! { <td {class}>{kind.emoji()}</td> },
        Body { index, len } => {
            let style = format!("opacity: {:.2}", body_opacity(index, len));
            html! {
                <td {class} {style}>{has_heart(index).then(|| html! { "♡" })}</td>
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Overlay {
    title: String,
    message: String,
    button: &'static str,
}

fn overlay_for(state: game::EngineState, score: u32) -> Option<Overlay> {
    use game::EndReason::*;
    use game::EngineState::*;

    match state {
        Running => None,
        Idle => Some(Overlay {
            title: "🐍 Cute Snake".to_string(),
            message: "Arrow keys or WASD to move, Space to start".to_string(),
            button: "Start 🍓",
        }),
        Over(BoardFull) => Some(Overlay {
            title: "🎉 Board cleared".to_string(),
            message: format!("You filled every cell with {} points!", score),
            button: "Play again 💖",
        }),
        Over(Wall | SelfCollision) => Some(Overlay {
            title: "😢 Game over".to_string(),
            message: format!("Your score is {}! Try again~", score),
            button: "Restart 💪",
        }),
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,

    /// Override the stored speed preset (slow, normal or fast)
    #[arg(long)]
    pub(crate) speed: Option<game::Speed>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    settings: Settings,
    engine: game::SnakeEngine,
    ticker: Ticker,
    effects: Effects,
    _eat_timeout: Option<Timeout>,
    _game_over_timeout: Option<Timeout>,
    _keyboard_listener: EventListener,
}

impl GameView {
    fn start_game(&mut self, ctx: &Context<Self>) {
        self.engine.start();
        self.effects = Effects::empty();

        let link = ctx.link().clone();
        self.ticker
            .start(self.settings.speed.period_ms(), move || link.send_message(Msg::Tick));
    }

    fn tick(&mut self, ctx: &Context<Self>) -> bool {
        match self.engine.tick() {
            Ok(outcome) => {
                if outcome.is_new_high_score() {
                    HighScore(self.engine.high_score()).local_save();
                }
                if outcome.ate_food() {
                    self.flash(ctx, Effects::EATING);
                }
                if outcome.is_game_over() {
                    self.ticker.stop();
                    self.flash(ctx, Effects::GAME_OVER);
                }
                true
            }
            Err(err) => {
                log::debug!("dropping stale tick: {}", err);
                self.ticker.stop();
                false
            }
        }
    }

    fn flash(&mut self, ctx: &Context<Self>, effect: Effects) {
        self.effects.insert(effect);

        let (delay_ms, slot) = if effect == Effects::EATING {
            (EAT_FLASH_MS, &mut self._eat_timeout)
        } else {
            (GAME_OVER_FLASH_MS, &mut self._game_over_timeout)
        };
        let link = ctx.link().clone();
        *slot = Some(Timeout::new(delay_ms, move || {
            link.send_message(Msg::ClearEffects(effect))
        }));
    }

    fn create_keyboard_listener(ctx: &Context<Self>) -> EventListener {
        let link = ctx.link().clone();
        EventListener::new_with_options(
            &gloo::utils::document(),
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let key = event.key();
                log::trace!("key down: {:?}", key);

                if let Some(action) = key_action(&key) {
                    if suppresses_default(&key) {
                        event.prevent_default();
                    }
                    link.send_message(Msg::from(action));
                }
            },
        )
    }

    fn board(&self) -> Array2<game::BoardCell> {
        if self.engine.state().is_idle() {
            game::Snapshot::preview(self.engine.config(), self.engine.high_score()).board()
        } else {
            self.engine.board()
        }
    }

    fn view_dpad(ctx: &Context<Self>) -> Html {
        use game::Direction::*;

        let button = |direction: game::Direction, label: &'static str| {
            let onclick = ctx.link().callback(move |_: MouseEvent| Msg::Turn(direction));
            let class = classes!("pad-btn", direction.name());
            html! { <button {class} {onclick}>{label}</button> }
        };

        html! {
            <div class="pad">
                {button(Up, "▲")}
                {button(Left, "◀")}
                {button(Down, "▼")}
                {button(Right, "▶")}
            </div>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();

        let mut settings: Settings = LocalOrDefault::local_or_default();
        if let Some(speed) = props.speed {
            settings.speed = speed;
        }
        let HighScore(high_score) = LocalOrDefault::local_or_default();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}, high score: {}", seed, high_score);

        Self {
            settings,
            engine: game::SnakeEngine::with_seed(game::GameConfig::default(), seed, high_score),
            ticker: Ticker::default(),
            effects: Effects::empty(),
            _eat_timeout: None,
            _game_over_timeout: None,
            _keyboard_listener: GameView::create_keyboard_listener(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Start if self.engine.is_running() => false,
            Start => {
                log::debug!("start game");
                self.start_game(ctx);
                true
            }
            Turn(direction) => {
                // only the pending direction changes, nothing to redraw
                let outcome = self.engine.turn(direction);
                log::trace!("turn {}: {:?}", direction, outcome);
                false
            }
            Tick => self.tick(ctx),
            UpdateSettings(settings) => {
                if self.settings != settings {
                    settings.local_save();
                    self.settings = settings;
                    true
                } else {
                    false
                }
            }
            ClearEffects(effects) => {
                let had_effects = self.effects.intersects(effects);
                self.effects.remove(effects);
                had_effects
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use settings::SpeedSelector;
        use Msg::*;

        let (cols, rows) = self.engine.size();
        let board = self.board();
        let score = format_for_counter(self.engine.score());
        let high_score = format_for_counter(self.engine.high_score());
        let board_class = classes!(
            "board",
            self.effects.contains(Effects::EATING).then_some("eating"),
            self.effects.contains(Effects::GAME_OVER).then_some("game-over")
        );

        let overlay = overlay_for(self.engine.state(), self.engine.score()).map(|overlay| {
            let onclick = ctx.link().callback(|e: MouseEvent| {
                e.stop_propagation();
                Start
            });
            html! {
                <div class="overlay">
                    <h2>{overlay.title}</h2>
                    <p>{overlay.message}</p>
                    <button {onclick}>{overlay.button}</button>
                </div>
            }
        });

        let on_speed = ctx
            .link()
            .callback(|speed| UpdateSettings(Settings { speed }));

        html! {
            <div class="cutesnake">
                <nav>
                    <aside>{"Score "}<strong>{score}</strong></aside>
                    <aside>{"Best "}<strong>{high_score}</strong></aside>
                </nav>
                <section>
                    <table class={board_class}>
                        {
                            for (0..rows).map(|y| html! {
                                <tr>
                                    {
                                        for (0..cols).map(|x| {
                                            let cell = board[(x, y).to_nd_index()];
                                            html! { <CellView {cell}/> }
                                        })
                                    }
                                </tr>
                            })
                        }
                    </table>
                    {overlay}
                </section>
                <SpeedSelector speed={self.settings.speed} onchange={on_speed}/>
                {GameView::view_dpad(ctx)}
            </div>
        }
    }
}
