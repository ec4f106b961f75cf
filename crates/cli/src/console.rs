use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use tapout_core::{Action, Actor, CardInstance, GameState, PlayerId, PlayerInfo, Presenter};

fn card_list(cards: &[CardInstance]) -> String {
    let names: Vec<String> = cards.iter().map(ToString::to_string).collect();
    format!("[{}]", names.join(", "))
}

fn seat_name(roster: &[PlayerInfo], player: PlayerId) -> String {
    roster
        .get(player)
        .map(|info| info.name.clone())
        .unwrap_or_else(|| format!("player {player}"))
}

/// Prints the decision holder's view of the table.
#[derive(Debug, Default)]
pub struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn render(&mut self, state: &GameState, roster: &[PlayerInfo]) {
        let acting = state.action_on;
        let opponent = state.opponent(acting);
        println!();
        println!(
            "{}'s turn; {}'s action; turn {}; current phase: {}",
            seat_name(roster, state.turn_holder),
            seat_name(roster, acting),
            state.turn_number,
            state.phase
        );
        if !state.combat.is_empty() {
            let attacker_owner = state.turn_holder;
            let defender = state.opponent(attacker_owner);
            let name = |owner: PlayerId, id| {
                state
                    .card(owner, id)
                    .map(|card| card.name().to_string())
                    .unwrap_or_else(|| id.to_string())
            };
            let combats: Vec<String> = state
                .combat
                .entries()
                .iter()
                .map(|entry| {
                    let blockers: Vec<String> =
                        entry.blockers.iter().map(|id| name(defender, *id)).collect();
                    format!(
                        "{} <- [{}]",
                        name(attacker_owner, entry.attacker),
                        blockers.join(", ")
                    )
                })
                .collect();
            println!("Combats: {}", combats.join("; "));
        }
        println!("Their board: {}", card_list(&state.zones(opponent).board.cards));
        println!("Board: {}", card_list(&state.zones(acting).board.cards));
        println!("Hand: {}", card_list(&state.zones(acting).hand.cards));
        println!();
    }
}

/// Reads a numbered choice from stdin. End of input passes the turn and
/// raises the shared `closed` flag.
pub struct ConsoleActor {
    closed: Rc<Cell<bool>>,
}

impl ConsoleActor {
    pub fn new(closed: Rc<Cell<bool>>) -> Self {
        Self { closed }
    }
}

impl Actor for ConsoleActor {
    fn select_action(&mut self, state: &GameState, player: PlayerId, legal: &[Action]) -> Action {
        for (idx, action) in legal.iter().enumerate() {
            println!("{idx}: {}", state.describe_action(player, action));
        }
        let stdin = io::stdin();
        loop {
            print!("Please select an action ");
            let _ = io::stdout().flush();
            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => {
                    self.closed.set(true);
                    return Action::PassTurn;
                }
                Ok(_) => {}
            }
            match line.trim().parse::<usize>().ok().and_then(|idx| legal.get(idx)) {
                Some(action) => return action.clone(),
                None => eprintln!("choose a number between 0 and {}", legal.len().saturating_sub(1)),
            }
        }
    }
}
