use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub type Participant = String;

/// A gift giver paired with the person they give to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    pub giver: Participant,
    pub receiver: Participant,
}

impl Transaction {
    pub fn new(giver: impl Into<Participant>, receiver: impl Into<Participant>) -> Self {
        Self {
            giver: giver.into(),
            receiver: receiver.into(),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<10} --> {}", self.giver, self.receiver)
    }
}

/// Participants who may not give to each other.
pub type ForbiddenGroup = Vec<Participant>;

/// The search input: participants plus the constraints, indexed for fast lookup.
///
/// `allowed[g][r]` is true when participant `g` may give to participant `r`.
/// The diagonal is always false.
#[derive(Debug, Clone)]
pub struct DrawProblem {
    participants: Vec<Participant>,
    forbidden_groups: Vec<ForbiddenGroup>,
    forbidden_transactions: Vec<Transaction>,
    allowed: Vec<Vec<bool>>,
}

impl DrawProblem {
    pub fn new(
        participants: Vec<Participant>,
        forbidden_groups: Vec<ForbiddenGroup>,
        forbidden_transactions: Vec<Transaction>,
    ) -> Self {
        let n = participants.len();
        let mut allowed = vec![vec![true; n]; n];

        for (i, row) in allowed.iter_mut().enumerate() {
            row[i] = false;
        }

        for group in &forbidden_groups {
            let members: HashSet<&str> = group.iter().map(String::as_str).collect();
            let indices: Vec<usize> = participants
                .iter()
                .enumerate()
                .filter(|(_, name)| members.contains(name.as_str()))
                .map(|(i, _)| i)
                .collect();
            for &g in &indices {
                for &r in &indices {
                    allowed[g][r] = false;
                }
            }
        }

        for transaction in &forbidden_transactions {
            let giver = participants.iter().position(|p| *p == transaction.giver);
            let receiver = participants.iter().position(|p| *p == transaction.receiver);
            if let (Some(g), Some(r)) = (giver, receiver) {
                allowed[g][r] = false;
            }
        }

        Self {
            participants,
            forbidden_groups,
            forbidden_transactions,
            allowed,
        }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn forbidden_groups(&self) -> &[ForbiddenGroup] {
        &self.forbidden_groups
    }

    pub fn forbidden_transactions(&self) -> &[Transaction] {
        &self.forbidden_transactions
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Whether participant index `giver` may give to participant index `receiver`.
    pub fn allows(&self, giver: usize, receiver: usize) -> bool {
        self.allowed[giver][receiver]
    }

    /// True when some transaction has both ends in one forbidden group.
    pub fn uses_forbidden_group(&self, transactions: &[Transaction]) -> bool {
        transactions.iter().any(|t| {
            self.forbidden_groups
                .iter()
                .any(|group| group.contains(&t.giver) && group.contains(&t.receiver))
        })
    }

    /// True when some transaction matches an explicitly forbidden pair.
    pub fn is_forbidden_transaction(&self, transactions: &[Transaction]) -> bool {
        transactions
            .iter()
            .any(|t| self.forbidden_transactions.contains(t))
    }

    /// Build a solution from `receivers`, where `receivers[i]` is the receiver
    /// index of participant `i`.
    pub fn solution_from_indices(&self, receivers: &[usize]) -> Solution {
        let transactions = receivers
            .iter()
            .enumerate()
            .map(|(g, &r)| {
                Transaction::new(self.participants[g].clone(), self.participants[r].clone())
            })
            .collect();
        Solution { transactions }
    }
}

/// A complete draw: one transaction per participant, in participant order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Solution {
    transactions: Vec<Transaction>,
}

impl Solution {
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn receiver_of(&self, giver: &str) -> Option<&str> {
        self.transactions
            .iter()
            .find(|t| t.giver == giver)
            .map(|t| t.receiver.as_str())
    }

    /// Every participant gives exactly once, receives exactly once, and
    /// nobody gives to themselves.
    pub fn is_derangement_of(&self, participants: &[Participant]) -> bool {
        if self.transactions.len() != participants.len() {
            return false;
        }
        let everyone: HashSet<&str> = participants.iter().map(String::as_str).collect();
        let givers: HashSet<&str> = self.transactions.iter().map(|t| t.giver.as_str()).collect();
        let receivers: HashSet<&str> = self
            .transactions
            .iter()
            .map(|t| t.receiver.as_str())
            .collect();

        givers == everyone
            && receivers == everyone
            && self.transactions.iter().all(|t| t.giver != t.receiver)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Derangement that also respects every constraint of `problem`.
    pub fn satisfies(&self, problem: &DrawProblem) -> bool {
        self.is_derangement_of(problem.participants())
            && !problem.uses_forbidden_group(&self.transactions)
            && !problem.is_forbidden_transaction(&self.transactions)
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for transaction in &self.transactions {
            writeln!(f, "{}", transaction)?;
        }
        Ok(())
    }
}
