use crate::settings::{NewGameForm, NewGameParams};
use crate::utils::*;
use bitflags::bitflags;
use gloo::timers::callback::{Interval, Timeout};
use serde::{Deserialize, Serialize};
use sweeper_core as game;
use yew::prelude::*;

/// Delay between the final reveal and the result dialog, so the board is drawn first.
const END_NOTICE_DELAY_MS: u32 = 100;
const TICK_MS: u32 = 1000;
const DEFAULT_CONFIG: game::GameConfig = game::GameConfig::new_unchecked((9, 9), 10);

/// Collects what a session call changed so the view knows whether to redraw and what to schedule.
#[derive(Clone, Debug, Default, PartialEq)]
struct ViewUpdates {
    changed_cells: usize,
    mines_remaining: Option<i32>,
    elapsed_secs: Option<u32>,
    ended: Option<bool>,
}

impl ViewUpdates {
    fn has_update(&self) -> bool {
        self.changed_cells > 0
            || self.mines_remaining.is_some()
            || self.elapsed_secs.is_some()
            || self.ended.is_some()
    }
}

impl game::SessionObserver for ViewUpdates {
    fn on_cell_changed(&mut self, cell: &game::Cell) {
        log::trace!("cell changed: {:?}", cell);
        self.changed_cells += 1;
    }

    fn on_counters_changed(&mut self, mines_remaining: i32) {
        self.mines_remaining = Some(mines_remaining);
    }

    fn on_timer_tick(&mut self, elapsed_secs: u32) {
        self.elapsed_secs = Some(elapsed_secs);
    }

    fn on_game_ended(&mut self, won: bool) {
        self.ended = Some(won);
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
        const BACK    = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct CellPointerState {
    pos: game::Coord2,
    buttons: MouseButtons,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum CellMsg {
    Down(CellPointerState),
    Up(game::Coord2),
    Leave,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellEvent(CellMsg),
    Tick,
    Restart,
    NewGame(NewGameParams),
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    cell: game::Cell,
    #[prop_or_default]
    pressed: bool,
    callback: Callback<CellMsg>,
}

fn cell_classes(cell: game::Cell) -> Classes {
    match cell {
        game::Cell {
            is_mine: true,
            is_revealed: true,
            is_flagged,
            ..
        } => classes!("open", "mine", is_flagged.then_some("flag")),
        game::Cell {
            is_revealed: true,
            adjacent_mines,
            ..
        } => classes!("open", format!("num-{}", adjacent_mines)),
        game::Cell {
            is_flagged: true, ..
        } => classes!("flag"),
        _ => classes!(),
    }
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        cell,
        pressed,
        callback,
    } = props.clone();
    let pos = cell.coords;

    let mut class = classes!("cell", cell_classes(cell));
    if pressed {
        class.push("pressed");
    }

    let onmousedown = {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            callback.emit(CellMsg::Down(CellPointerState { pos, buttons }));
            log::trace!("{:?} mouse down ({:?})", pos, buttons);
        })
    };

    let onmouseup = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| {
            callback.emit(CellMsg::Up(pos));
            log::trace!("{:?} mouse up", pos);
        })
    };

    let onmouseleave = Callback::from(move |_: MouseEvent| callback.emit(CellMsg::Leave));

    let label = if cell.is_revealed && !cell.is_mine && cell.adjacent_mines > 0 {
        cell.adjacent_mines.to_string()
    } else {
        String::new()
    };

    html! {
        <td {class} {onmousedown} {onmouseup} {onmouseleave}>{label}</td>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Seed of the first game, later games always draw a fresh one
    #[prop_or_default]
    pub seed: Option<u64>,
    /// Parameters of the first game, falls back to the last used ones
    #[prop_or_default]
    pub params: Option<NewGameParams>,
}

pub(crate) struct GameView {
    params: NewGameParams,
    session: game::Session,
    pressed: Option<CellPointerState>,
    timer_interval: Option<Interval>,
    end_notice: Option<Timeout>,
}

impl GameView {
    fn start_session(params: &NewGameParams, seed: u64) -> game::Session {
        let config = params.config().unwrap_or_else(|err| {
            log::warn!("unusable parameters {:?} ({}), using defaults", params, err);
            DEFAULT_CONFIG
        });
        log::debug!("seed: {}", seed);
        game::Session::new(config, game::RandomMineGenerator::new(seed))
    }

    fn get_game_state_class(&self) -> Classes {
        use game::GameState::*;
        classes!(match self.session.state() {
            Playing if self.pressed.is_some() => "mid-open",
            Playing if !self.session.first_click_taken() => "not-started",
            Playing => "in-progress",
            Won => "win",
            Lost => "lose",
        })
    }

    fn is_pressed(&self, coords: game::Coord2) -> bool {
        matches!(
            self.pressed,
            Some(CellPointerState {
                pos,
                buttons: MouseButtons::LEFT,
            }) if pos == coords
        ) && self.session.cell_at(coords).is_covered()
            && !self.session.is_finished()
    }

    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(TICK_MS, move || link.send_message(Msg::Tick))
    }

    /// Keeps the interval alive exactly while the session clock runs and announces the result once.
    fn apply(&mut self, ctx: &Context<Self>, updates: ViewUpdates) -> bool {
        if let Some(won) = updates.ended {
            if self.timer_interval.take().is_some() {
                log::debug!("interval cancelled");
            }
            let message = if won { "You won!" } else { "You lost!" };
            self.end_notice = Some(Timeout::new(END_NOTICE_DELAY_MS, move || {
                gloo::dialogs::alert(message)
            }));
        } else if self.session.is_timer_running() && self.timer_interval.is_none() {
            log::debug!("interval started");
            self.timer_interval = Some(Self::create_timer(ctx));
        }
        updates.has_update()
    }

    fn reset(&mut self, params: NewGameParams) {
        self.session = Self::start_session(&params, js_random_seed());
        self.params = params;
        self.pressed = None;
        self.timer_interval = None;
        self.end_notice = None;
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let GameProps { seed, params } = ctx.props().clone();
        let params = params.unwrap_or_else(LocalOrDefault::local_or_default);
        let seed = seed.unwrap_or_else(js_random_seed);
        Self {
            session: Self::start_session(&params, seed),
            params,
            pressed: None,
            timer_interval: None,
            end_notice: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use CellMsg::*;
        use Msg::*;

        match msg {
            CellEvent(Down(state)) => self.pressed.replace(state) != Some(state),
            CellEvent(Leave) => self.pressed.take().is_some(),
            CellEvent(Up(pos)) => {
                let Some(CellPointerState { pos: down_pos, buttons }) = self.pressed.take() else {
                    return false;
                };
                if down_pos != pos {
                    return true;
                }
                let mut updates = ViewUpdates::default();
                match buttons {
                    MouseButtons::LEFT => {
                        log::debug!("reveal cell: {:?}", pos);
                        self.session.reveal_cell(pos, &mut updates);
                    }
                    MouseButtons::RIGHT => {
                        log::debug!("flag cell: {:?}", pos);
                        self.session.toggle_flag(pos, &mut updates);
                    }
                    _ => log::trace!("ignoring buttons {:?}", buttons),
                }
                // the pressed look was cleared either way
                self.apply(ctx, updates);
                true
            }
            Tick => {
                let mut updates = ViewUpdates::default();
                self.session.tick(&mut updates);
                self.apply(ctx, updates)
            }
            Restart => {
                self.reset(self.params);
                true
            }
            NewGame(params) => {
                params.local_save();
                self.reset(params);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let (cols, rows) = self.session.size();
        let game_state_class = self.get_game_state_class();
        let mines_left = format_for_counter(self.session.mines_remaining());
        let elapsed_time =
            format_for_counter(i32::try_from(self.session.elapsed_secs()).unwrap_or(i32::MAX));
        let playable = !self.session.is_finished();

        let cb_restart = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Restart
        });
        let cb_new_game = ctx.link().callback(NewGame);

        html! {
            <div class="sweeper" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <NewGameForm params={self.params} on_submit={cb_new_game}/>
                <nav>
                    <aside>{mines_left}</aside>
                    <span><button class={game_state_class} onclick={cb_restart}/></span>
                    <aside>{elapsed_time}</aside>
                </nav>
                <table class={playable.then_some("playable")}>
                    {
                        for (0..rows).map(|y| html! {
                            <tr>
                                {
                                    for (0..cols).map(|x| {
                                        let cell = self.session.cell_at((x, y));
                                        let pressed = self.is_pressed((x, y));
                                        let callback = ctx.link().callback(Msg::CellEvent);
                                        html! {
                                            <CellView {cell} {pressed} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
            </div>
        }
    }
}
