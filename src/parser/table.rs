//! LALR(1) automaton construction.
//!
//! Builds the canonical collection of LR(1) item sets, merges sets that share
//! the same core and fills the ACTION and GOTO tables from the result.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use log::debug;

use crate::errors::errors::{Error, ErrorImpl};

use super::grammar::{Grammar, NonTerminal, Symbol, Terminal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseAction {
    Shift(usize),
    Reduce(usize),
    Accept,
}

/// `production` with the dot before `rhs[dot]`, valid when followed by `lookahead`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Item {
    production: usize,
    dot: usize,
    lookahead: Terminal,
}

type ItemSet = BTreeSet<Item>;
type Core = BTreeSet<(usize, usize)>;

struct FirstSets {
    first: HashMap<NonTerminal, BTreeSet<Terminal>>,
    nullable: HashSet<NonTerminal>,
}

impl FirstSets {
    fn compute(grammar: &Grammar) -> Self {
        let mut sets = FirstSets {
            first: HashMap::new(),
            nullable: HashSet::new(),
        };

        let mut changed = true;
        while changed {
            changed = false;

            for production in grammar.productions() {
                let mut additions = BTreeSet::new();
                let mut all_nullable = true;

                for symbol in &production.rhs {
                    match symbol {
                        Symbol::Terminal(terminal) => {
                            additions.insert(*terminal);
                            all_nullable = false;
                        }
                        Symbol::NonTerminal(non_terminal) => {
                            if let Some(first) = sets.first.get(non_terminal) {
                                additions.extend(first.iter().copied());
                            }
                            all_nullable = sets.nullable.contains(non_terminal);
                        }
                    }
                    if !all_nullable {
                        break;
                    }
                }

                if all_nullable && sets.nullable.insert(production.lhs) {
                    changed = true;
                }

                let entry = sets.first.entry(production.lhs).or_default();
                let before = entry.len();
                entry.extend(additions);
                if entry.len() != before {
                    changed = true;
                }
            }
        }

        sets
    }

    /// FIRST of `symbols` followed by `lookahead`.
    fn of_sequence(&self, symbols: &[Symbol], lookahead: Terminal) -> BTreeSet<Terminal> {
        let mut result = BTreeSet::new();

        for symbol in symbols {
            match symbol {
                Symbol::Terminal(terminal) => {
                    result.insert(*terminal);
                    return result;
                }
                Symbol::NonTerminal(non_terminal) => {
                    if let Some(first) = self.first.get(non_terminal) {
                        result.extend(first.iter().copied());
                    }
                    if !self.nullable.contains(non_terminal) {
                        return result;
                    }
                }
            }
        }

        result.insert(lookahead);
        result
    }
}

fn next_symbol(grammar: &Grammar, item: &Item) -> Option<Symbol> {
    grammar.productions()[item.production]
        .rhs
        .get(item.dot)
        .copied()
}

fn closure(grammar: &Grammar, first_sets: &FirstSets, kernel: ItemSet) -> ItemSet {
    let mut items = kernel;
    let mut pending: Vec<Item> = items.iter().copied().collect();

    while let Some(item) = pending.pop() {
        let Some(Symbol::NonTerminal(non_terminal)) = next_symbol(grammar, &item) else {
            continue;
        };

        let rest = &grammar.productions()[item.production].rhs[item.dot + 1..];
        let lookaheads = first_sets.of_sequence(rest, item.lookahead);

        for (index, _) in grammar.productions_of(non_terminal) {
            for lookahead in &lookaheads {
                let new_item = Item {
                    production: index,
                    dot: 0,
                    lookahead: *lookahead,
                };
                if items.insert(new_item) {
                    pending.push(new_item);
                }
            }
        }
    }

    items
}

fn goto(grammar: &Grammar, first_sets: &FirstSets, items: &ItemSet, symbol: Symbol) -> ItemSet {
    let kernel = items
        .iter()
        .filter(|item| next_symbol(grammar, item) == Some(symbol))
        .map(|item| Item {
            dot: item.dot + 1,
            ..*item
        })
        .collect();

    closure(grammar, first_sets, kernel)
}

fn core_of(items: &ItemSet) -> Core {
    items.iter().map(|item| (item.production, item.dot)).collect()
}

/// The canonical LR(1) collection: item sets and their transitions.
fn canonical_collection(grammar: &Grammar) -> (Vec<ItemSet>, Vec<BTreeMap<Symbol, usize>>) {
    let first_sets = FirstSets::compute(grammar);

    let start = closure(
        grammar,
        &first_sets,
        BTreeSet::from([Item {
            production: 0,
            dot: 0,
            lookahead: Terminal::End,
        }]),
    );

    let mut states = vec![start.clone()];
    let mut index: HashMap<ItemSet, usize> = HashMap::from([(start, 0)]);
    let mut transitions: Vec<BTreeMap<Symbol, usize>> = vec![BTreeMap::new()];

    let mut current = 0;
    while current < states.len() {
        let symbols: BTreeSet<Symbol> = states[current]
            .iter()
            .filter_map(|item| next_symbol(grammar, item))
            .collect();

        for symbol in symbols {
            let target = goto(grammar, &first_sets, &states[current], symbol);
            let target_index = match index.get(&target) {
                Some(existing) => *existing,
                None => {
                    states.push(target.clone());
                    transitions.push(BTreeMap::new());
                    index.insert(target, states.len() - 1);
                    states.len() - 1
                }
            };
            transitions[current].insert(symbol, target_index);
        }

        current += 1;
    }

    (states, transitions)
}

/// ACTION and GOTO tables of an LALR(1) automaton.
#[derive(Debug)]
pub struct ParseTable {
    actions: Vec<HashMap<Terminal, ParseAction>>,
    gotos: Vec<HashMap<NonTerminal, usize>>,
}

impl ParseTable {
    /// Builds the tables for `grammar`, failing on any conflict.
    pub fn build(grammar: &Grammar) -> Result<ParseTable, Error> {
        let (lr1_states, lr1_transitions) = canonical_collection(grammar);

        // States with equal cores collapse into one LALR state, numbered in
        // order of first appearance so the start state stays 0.
        let mut core_index: HashMap<Core, usize> = HashMap::new();
        let mut merged_of = Vec::with_capacity(lr1_states.len());
        for items in &lr1_states {
            let next = core_index.len();
            merged_of.push(*core_index.entry(core_of(items)).or_insert(next));
        }

        let state_count = core_index.len();
        let mut merged_items: Vec<ItemSet> = vec![BTreeSet::new(); state_count];
        let mut merged_transitions: Vec<BTreeMap<Symbol, usize>> = vec![BTreeMap::new(); state_count];
        for (lr1, items) in lr1_states.iter().enumerate() {
            let merged = merged_of[lr1];
            merged_items[merged].extend(items.iter().copied());
            for (symbol, target) in &lr1_transitions[lr1] {
                merged_transitions[merged].insert(*symbol, merged_of[*target]);
            }
        }

        let mut table = ParseTable {
            actions: vec![HashMap::new(); state_count],
            gotos: vec![HashMap::new(); state_count],
        };

        for (state, items) in merged_items.iter().enumerate() {
            for item in items {
                match next_symbol(grammar, item) {
                    Some(Symbol::Terminal(terminal)) => {
                        if let Some(target) = merged_transitions[state].get(&Symbol::Terminal(terminal)) {
                            table.insert_action(grammar, state, terminal, ParseAction::Shift(*target))?;
                        }
                    }
                    Some(Symbol::NonTerminal(_)) => {}
                    None if item.production == 0 => {
                        if item.lookahead == Terminal::End {
                            table.insert_action(grammar, state, Terminal::End, ParseAction::Accept)?;
                        }
                    }
                    None => {
                        table.insert_action(
                            grammar,
                            state,
                            item.lookahead,
                            ParseAction::Reduce(item.production),
                        )?;
                    }
                }
            }

            for (symbol, target) in &merged_transitions[state] {
                if let Symbol::NonTerminal(non_terminal) = symbol {
                    table.gotos[state].insert(*non_terminal, *target);
                }
            }
        }

        debug!(
            "built LALR(1) table: {} LR(1) states merged into {}",
            lr1_states.len(),
            state_count
        );
        Ok(table)
    }

    fn insert_action(
        &mut self,
        grammar: &Grammar,
        state: usize,
        terminal: Terminal,
        action: ParseAction,
    ) -> Result<(), Error> {
        match self.actions[state].get(&terminal) {
            Some(existing) if *existing != action => Err(Error::without_position(
                ErrorImpl::GrammarConflict {
                    state,
                    symbol: terminal.to_string(),
                    message: format!(
                        "{} / {}",
                        describe(grammar, *existing),
                        describe(grammar, action)
                    ),
                },
            )),
            _ => {
                self.actions[state].insert(terminal, action);
                Ok(())
            }
        }
    }

    pub fn action(&self, state: usize, terminal: Terminal) -> Option<ParseAction> {
        self.actions.get(state)?.get(&terminal).copied()
    }

    pub fn goto(&self, state: usize, non_terminal: NonTerminal) -> Option<usize> {
        self.gotos.get(state)?.get(&non_terminal).copied()
    }

    /// Terminals with an action in `state`, sorted.
    pub fn expected(&self, state: usize) -> Vec<Terminal> {
        let mut expected: Vec<Terminal> = self
            .actions
            .get(state)
            .map(|actions| actions.keys().copied().collect())
            .unwrap_or_default();
        expected.sort();
        expected
    }

    pub fn state_count(&self) -> usize {
        self.actions.len()
    }
}

fn describe(grammar: &Grammar, action: ParseAction) -> String {
    match action {
        ParseAction::Shift(target) => format!("shift to {}", target),
        ParseAction::Reduce(production) => format!("reduce {}", grammar.productions()[production]),
        ParseAction::Accept => String::from("accept"),
    }
}
