use farmbooks_core::Aggregate;

/// Execute a command against an aggregate: decide, then evolve in place.
///
/// 1. `aggregate.handle(command)` produces events without touching state.
/// 2. Each event is applied in order.
///
/// On error nothing is applied, so the aggregate is left exactly as it was.
pub fn execute<A>(aggregate: &mut A, command: &A::Command) -> Result<Vec<A::Event>, A::Error>
where
    A: Aggregate,
{
    let events = A::handle(aggregate, command)?;
    for ev in &events {
        A::apply(aggregate, ev);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Counter {
        value: i64,
        version: u64,
    }

    impl Aggregate for Counter {
        type Command = i64;
        type Event = i64;
        type Error = String;

        fn version(&self) -> u64 {
            self.version
        }

        fn apply(&mut self, event: &i64) {
            self.value += event;
            self.version += 1;
        }

        fn handle(&self, command: &i64) -> Result<Vec<i64>, String> {
            if self.value + command < 0 {
                return Err("would go negative".to_string());
            }
            Ok(vec![*command])
        }
    }

    #[test]
    fn execute_applies_emitted_events() {
        let mut counter = Counter::default();
        let events = execute(&mut counter, &5).unwrap();
        assert_eq!(events, vec![5]);
        assert_eq!(counter.value, 5);
        assert_eq!(counter.version(), 1);
    }

    #[test]
    fn rejected_command_leaves_state_untouched() {
        let mut counter = Counter::default();
        assert!(execute(&mut counter, &-1).is_err());
        assert_eq!(counter.value, 0);
        assert_eq!(counter.version(), 0);
    }
}
