use serde::{Deserialize, Serialize};
use sweeper_core as game;
use thiserror::Error;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::utils::StorageKey;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParamError {
    #[error("{0} must be a whole number")]
    NotANumber(&'static str),
    #[error("Width, height and mine count must be at least 1")]
    NotPositive,
    #[error("There must be fewer mines than cells")]
    TooManyMines,
    #[error("Width and height must be at most {}", game::GameConfig::MAX_SIDE)]
    TooLarge,
}

/// Last parameters entered in the new game form, raw so that stale stored values are validated again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct NewGameParams {
    pub width: i64,
    pub height: i64,
    pub mines: i64,
}

impl Default for NewGameParams {
    fn default() -> Self {
        Self {
            width: 9,
            height: 9,
            mines: 10,
        }
    }
}

impl StorageKey for NewGameParams {
    const KEY: &'static str = "sweeper:params";
}

impl NewGameParams {
    pub(crate) fn parse(width: &str, height: &str, mines: &str) -> Result<Self, ParamError> {
        let field = |value: &str, name| {
            value
                .trim()
                .parse::<i64>()
                .map_err(|_| ParamError::NotANumber(name))
        };
        let params = Self {
            width: field(width, "Width")?,
            height: field(height, "Height")?,
            mines: field(mines, "Mine count")?,
        };
        params.config()?;
        Ok(params)
    }

    /// Checks in the order the form reports problems: positivity, mine density, then board size.
    pub(crate) fn config(&self) -> Result<game::GameConfig, ParamError> {
        let Self {
            width,
            height,
            mines,
        } = *self;
        if width <= 0 || height <= 0 || mines <= 0 {
            return Err(ParamError::NotPositive);
        }
        if mines >= width.saturating_mul(height) {
            return Err(ParamError::TooManyMines);
        }
        let max_side = i64::from(game::GameConfig::MAX_SIDE);
        if width > max_side || height > max_side {
            return Err(ParamError::TooLarge);
        }

        // in range after the checks above
        let size = (width as game::Coord, height as game::Coord);
        game::GameConfig::new(size, mines as game::CellCount).map_err(|err| {
            log::error!("form checks accepted {:?}: {}", self, err);
            ParamError::TooManyMines
        })
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct NewGameFormProps {
    pub params: NewGameParams,
    pub on_submit: Callback<NewGameParams>,
}

#[function_component(NewGameForm)]
pub(crate) fn new_game_form(props: &NewGameFormProps) -> Html {
    let width_ref = use_node_ref();
    let height_ref = use_node_ref();
    let mines_ref = use_node_ref();

    let onclick = {
        let width_ref = width_ref.clone();
        let height_ref = height_ref.clone();
        let mines_ref = mines_ref.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let value = |node: &NodeRef| {
                node.cast::<HtmlInputElement>()
                    .map(|input| input.value())
                    .unwrap_or_default()
            };
            match NewGameParams::parse(&value(&width_ref), &value(&height_ref), &value(&mines_ref)) {
                Ok(params) => on_submit.emit(params),
                Err(err) => {
                    log::debug!("rejected new game parameters: {}", err);
                    gloo::dialogs::alert(&err.to_string());
                }
            }
        })
    };

    let max_side = game::GameConfig::MAX_SIDE.to_string();
    let NewGameParams {
        width,
        height,
        mines,
    } = props.params;

    html! {
        <form class="new-game" onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
            <label>{"Width"}
                <input ref={width_ref} type="number" min="1" max={max_side.clone()} value={width.to_string()}/>
            </label>
            <label>{"Height"}
                <input ref={height_ref} type="number" min="1" max={max_side} value={height.to_string()}/>
            </label>
            <label>{"Mines"}
                <input ref={mines_ref} type="number" min="1" value={mines.to_string()}/>
            </label>
            <button {onclick}>{"New game"}</button>
        </form>
    }
}
