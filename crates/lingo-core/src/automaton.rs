//! Finite automata over path strings
//!
//! Every active file filter compiles to a small NFA; the union of all of
//! them is determinized once so a directory scan needs a single pass over
//! each path no matter how many resources are configured. Owner tags live
//! on accepting states and survive union and determinization unchanged, so
//! an accepted path always reports which filters claimed it.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use crate::filter::{FileFilter, Token};

/// The canonical path separator; the placeholder wildcard never matches it.
pub const SEPARATOR: char = '/';

/// Index into a state arena.
pub type StateId = usize;

/// Owner tag: the declaration index of the resource a filter belongs to.
pub type Tag = usize;

/// One NFA state.
///
/// `wildcard` successors are reachable on any character except the path
/// separator, independent of what `literal` lists for that character.
#[derive(Debug, Clone, Default)]
struct NfaState {
    literal: BTreeMap<char, BTreeSet<StateId>>,
    wildcard: BTreeSet<StateId>,
    /// Non-empty only on accepting states
    tags: BTreeSet<Tag>,
}

/// Non-deterministic state graph recognizing one or more templates.
#[derive(Debug, Clone)]
pub struct Nfa {
    states: Vec<NfaState>,
    start: StateId,
}

impl Nfa {
    /// Compile a single file filter into a linear chain of states.
    ///
    /// Literal characters become one transition each. The placeholder
    /// becomes a single state with a wildcard self-loop, entered by a
    /// wildcard edge, so it matches one or more non-separator characters.
    /// The final state is accepting and tagged with the owning resource.
    pub fn compile(filter: &FileFilter, tag: Tag) -> Self {
        let mut states = vec![NfaState::default()];
        let mut current: StateId = 0;
        for token in filter.tokens() {
            let next = states.len();
            states.push(NfaState::default());
            match token {
                Token::Literal(c) => {
                    states[current].literal.entry(c).or_default().insert(next);
                }
                Token::Language => {
                    states[current].wildcard.insert(next);
                    states[next].wildcard.insert(next);
                }
            }
            current = next;
        }
        states[current].tags.insert(tag);
        Self { states, start: 0 }
    }

    /// Merge several automata under one synthetic start state.
    ///
    /// The new start unions every input start's transitions; accepting
    /// states keep their tags untouched.
    pub fn union(automata: Vec<Nfa>) -> Self {
        let mut states = vec![NfaState::default()];
        for nfa in automata {
            let offset = states.len();
            let start = nfa.start + offset;
            for state in nfa.states {
                states.push(shift_state(state, offset));
            }
            let entry = states[start].clone();
            for (c, targets) in entry.literal {
                states[0].literal.entry(c).or_default().extend(targets);
            }
            states[0].wildcard.extend(entry.wildcard);
            // A zero-length template would make the start accepting; the
            // filter parser guarantees at least the placeholder token.
            debug_assert!(states[start].tags.is_empty());
        }
        Self { states, start: 0 }
    }
}

fn shift_state(state: NfaState, offset: usize) -> NfaState {
    NfaState {
        literal: state
            .literal
            .into_iter()
            .map(|(c, targets)| (c, targets.into_iter().map(|s| s + offset).collect()))
            .collect(),
        wildcard: state.wildcard.into_iter().map(|s| s + offset).collect(),
        tags: state.tags,
    }
}

/// One DFA state.
///
/// `wildcard` is the default edge: taken on any character that is neither
/// the separator nor one of the `literal` keys. Splitting it out avoids
/// enumerating the whole alphabet during subset construction.
#[derive(Debug, Clone, Default)]
struct DfaState {
    literal: BTreeMap<char, StateId>,
    wildcard: Option<StateId>,
    tags: BTreeSet<Tag>,
}

/// Deterministic state graph produced by subset construction.
#[derive(Debug, Clone)]
pub struct Dfa {
    states: Vec<DfaState>,
    start: StateId,
}

impl Dfa {
    /// Subset construction.
    ///
    /// Each DFA state corresponds to a set of NFA states reachable
    /// together. The transition for an explicit character unions that
    /// character's successors with the wildcard successors (a wildcard
    /// matches explicit characters too); the default edge unions only the
    /// wildcard successors, since it is taken exactly when no literal key
    /// applies.
    pub fn determinize(nfa: &Nfa) -> Self {
        let mut states: Vec<DfaState> = vec![DfaState::default()];
        let mut mapping: HashMap<BTreeSet<StateId>, StateId> = HashMap::new();

        let start_set: BTreeSet<StateId> = [nfa.start].into_iter().collect();
        mapping.insert(start_set.clone(), 0);
        let mut queue: VecDeque<(BTreeSet<StateId>, StateId)> = VecDeque::new();
        queue.push_back((start_set, 0));

        while let Some((member_set, id)) = queue.pop_front() {
            let mut tags = BTreeSet::new();
            let mut wildcard_targets = BTreeSet::new();
            let mut chars = BTreeSet::new();
            for &member in &member_set {
                let state = &nfa.states[member];
                tags.extend(state.tags.iter().copied());
                wildcard_targets.extend(state.wildcard.iter().copied());
                chars.extend(state.literal.keys().copied());
            }
            states[id].tags = tags;

            for c in chars {
                let mut targets = BTreeSet::new();
                for &member in &member_set {
                    if let Some(successors) = nfa.states[member].literal.get(&c) {
                        targets.extend(successors.iter().copied());
                    }
                }
                if c != SEPARATOR {
                    targets.extend(wildcard_targets.iter().copied());
                }
                let target_id = intern(&mut states, &mut mapping, &mut queue, targets);
                states[id].literal.insert(c, target_id);
            }

            if !wildcard_targets.is_empty() {
                let target_id = intern(&mut states, &mut mapping, &mut queue, wildcard_targets);
                states[id].wildcard = Some(target_id);
            }
        }

        Self { states, start: 0 }
    }

    /// Run a path through the DFA.
    ///
    /// Returns the owner tags of the accepting state, or `None` when the
    /// path is not claimed by any filter. Tags are ordered by resource
    /// declaration index, so `first()` is the documented deterministic
    /// tie-break for paths matched by more than one template.
    pub fn matches(&self, path: &str) -> Option<&BTreeSet<Tag>> {
        let mut current = self.start;
        for c in path.chars() {
            let state = &self.states[current];
            current = match state.literal.get(&c) {
                Some(&next) => next,
                None if c != SEPARATOR => state.wildcard?,
                None => return None,
            };
        }
        let tags = &self.states[current].tags;
        if tags.is_empty() { None } else { Some(tags) }
    }

    #[cfg(test)]
    pub(crate) fn state_count(&self) -> usize {
        self.states.len()
    }
}

fn intern(
    states: &mut Vec<DfaState>,
    mapping: &mut HashMap<BTreeSet<StateId>, StateId>,
    queue: &mut VecDeque<(BTreeSet<StateId>, StateId)>,
    member_set: BTreeSet<StateId>,
) -> StateId {
    if let Some(&existing) = mapping.get(&member_set) {
        return existing;
    }
    let id = states.len();
    states.push(DfaState::default());
    mapping.insert(member_set.clone(), id);
    queue.push_back((member_set, id));
    id
}
