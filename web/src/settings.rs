use crate::utils::*;
use cutesnake_core::Speed;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub speed: Speed,
}

impl StorageKey for Settings {
    const KEY: &'static str = "cutesnake:settings";
}

/// Best score ever reached, stored as a bare JSON number.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct HighScore(pub u32);

impl StorageKey for HighScore {
    const KEY: &'static str = "cuteSnakeHighScore";
}

#[derive(Properties, PartialEq)]
pub(crate) struct SpeedSelectorProps {
    pub speed: Speed,
    pub onchange: Callback<Speed>,
}

/// Speed preset buttons, the choice applies from the next game on.
#[function_component]
pub(crate) fn SpeedSelector(props: &SpeedSelectorProps) -> Html {
    html! {
        <menu class="speed">
            {
                for Speed::ALL.into_iter().map(|speed| {
                    let onclick = props.onchange.reform(move |_: MouseEvent| speed);
                    let class = classes!("speed-btn", (speed == props.speed).then_some("active"));
                    html! {
                        <li><button {class} {onclick}>{speed_label(speed)}</button></li>
                    }
                })
            }
        </menu>
    }
}

const fn speed_label(speed: Speed) -> &'static str {
    match speed {
        Speed::Slow => "🐢 Slow",
        Speed::Normal => "🐍 Normal",
        Speed::Fast => "🐇 Fast",
    }
}
