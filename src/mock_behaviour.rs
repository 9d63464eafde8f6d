//! This module provides ways to tweak a local [`Cache`](crate::cache::Cache), so that it can return errors on some tests
//!
//! Every call the cache answers is a [`Call`]. A [`MockBehaviour`] maps calls to a [`Script`],
//! that tells how many times the call succeeds, then how many times it fails.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::coordinator::refresh::Section;

/// A change sent to the task store
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mutation {
    Create,
    Toggle,
    Delete,
}

/// A call answered by the local store
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Call {
    Fetch(Section),
    Mutate(Mutation),
}

const FETCHES: [Call; 4] = [
    Call::Fetch(Section::Courses),
    Call::Fetch(Section::Deadlines),
    Call::Fetch(Section::StudyTasks),
    Call::Fetch(Section::Stats),
];
const MUTATIONS: [Call; 3] = [
    Call::Mutate(Mutation::Create),
    Call::Mutate(Mutation::Toggle),
    Call::Mutate(Mutation::Delete),
];

impl Display for Call {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Call::Fetch(section) => write!(f, "fetch of {}", section),
            Call::Mutate(Mutation::Create) => write!(f, "task creation"),
            Call::Mutate(Mutation::Toggle) => write!(f, "task toggle"),
            Call::Mutate(Mutation::Delete) => write!(f, "task deletion"),
        }
    }
}

/// `successes` calls go through, then `failures` calls fail. Every later call goes through
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Script {
    pub successes: u32,
    pub failures: u32,
}

impl Script {
    pub fn failing(failures: u32) -> Self {
        Self { successes: 0, failures }
    }

    pub fn failing_after(successes: u32, failures: u32) -> Self {
        Self { successes, failures }
    }

    /// Consume one call. Returns whether it must fail
    fn play(&mut self) -> bool {
        if self.successes > 0 {
            self.successes -= 1;
            false
        } else if self.failures > 0 {
            self.failures -= 1;
            true
        } else {
            false
        }
    }

    fn is_over(&self) -> bool {
        self.successes == 0 && self.failures == 0
    }
}


/// Scripted failures for some of the calls of a mocked store. Calls without a script always succeed
#[derive(Clone, Debug, Default)]
pub struct MockBehaviour {
    scripts: HashMap<Call, Script>,
    suspended: bool,
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the script of a call, replacing any previous one
    pub fn with(mut self, call: Call, script: Script) -> Self {
        self.scripts.insert(call, script);
        self
    }

    /// Every call will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        FETCHES.iter().chain(MUTATIONS.iter())
            .fold(Self::new(), |behaviour, call| behaviour.with(*call, Script::failing(n_fails)))
    }

    /// Every mutation will fail, for `n_fails` times. Fetches keep working
    pub fn fail_mutations(n_fails: u32) -> Self {
        MUTATIONS.iter()
            .fold(Self::new(), |behaviour, call| behaviour.with(*call, Script::failing(n_fails)))
    }

    /// The next `n_fails` fetches of `section` will fail
    pub fn fail_section(section: Section, n_fails: u32) -> Self {
        Self::new().with(Call::Fetch(section), Script::failing(n_fails))
    }

    /// Let every call through until [`Self::resume`] is called. Scripts are not consumed meanwhile
    pub fn suspend(&mut self) {
        self.suspended = true;
    }
    pub fn resume(&mut self) {
        self.suspended = false;
    }

    /// Whether every script has been played until its end
    pub fn is_exhausted(&self) -> bool {
        self.scripts.values().all(Script::is_over)
    }

    /// Play the script of `call`, and return an error in case it must fail this time
    pub fn check(&mut self, call: Call) -> Result<(), Box<dyn Error>> {
        if self.suspended {
            return Ok(());
        }
        let script = match self.scripts.get_mut(&call) {
            None => return Ok(()),
            Some(script) => script,
        };

        if script.play() {
            log::debug!("Mock behaviour: failing a {} ({} more failure(s) to come)", call, script.failures);
            Err(format!("Mocked failure of a {}", call).into())
        } else {
            log::debug!("Mock behaviour: allowing a {}", call);
            Ok(())
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;

    const COURSES: Call = Call::Fetch(Section::Courses);
    const CREATE: Call = Call::Mutate(Mutation::Create);
    const TOGGLE: Call = Call::Mutate(Mutation::Toggle);

    #[test]
    fn unscripted_calls_succeed() {
        let mut ok = MockBehaviour::new();
        for _ in 0..5 {
            assert!(ok.check(COURSES).is_ok());
            assert!(ok.check(TOGGLE).is_ok());
        }
        assert!(ok.is_exhausted());
    }

    #[test]
    fn scripts_are_played_per_call() {
        let mut now = MockBehaviour::fail_now(2);
        assert!(now.check(COURSES).is_err());
        assert!(now.check(CREATE).is_err());
        assert!(now.check(CREATE).is_err());
        assert!(now.check(COURSES).is_err());
        assert!(now.check(COURSES).is_ok());
        assert!(now.check(CREATE).is_ok());
        assert!(!now.is_exhausted());

        let delete = Call::Mutate(Mutation::Delete);
        let mut custom = MockBehaviour::fail_section(Section::Deadlines, 1)
            .with(delete, Script::failing_after(1, 3));
        let deadlines = Call::Fetch(Section::Deadlines);
        assert!(custom.check(deadlines).is_err());
        assert!(custom.check(deadlines).is_ok());
        assert!(custom.check(delete).is_ok());
        assert!(custom.check(delete).is_err());
        assert!(custom.check(delete).is_err());
        assert!(custom.check(delete).is_err());
        assert!(custom.check(delete).is_ok());
        assert!(custom.is_exhausted());
    }

    #[test]
    fn suspended_scripts_are_kept_for_later() {
        let mut suspended = MockBehaviour::fail_mutations(1);
        assert!(suspended.check(Call::Fetch(Section::StudyTasks)).is_ok());
        suspended.suspend();
        assert!(suspended.check(TOGGLE).is_ok());
        suspended.resume();
        let err = suspended.check(TOGGLE).unwrap_err();
        assert_eq!(err.to_string(), "Mocked failure of a task toggle");
        assert!(suspended.check(TOGGLE).is_ok());
    }
}
