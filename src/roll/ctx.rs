use super::{error::RollError, rolled::RolledSet, roller::Roller, RResult};
use crate::common::*;
use crate::config::RollConfig;
use crate::parse::ast::DiceExpression;

pub type DefaultRoller = rand::rngs::ThreadRng;

/// Evaluates dice expressions against a random source, counting every die
/// rolled against an optional budget.
pub struct RollContext<R = DefaultRoller> {
    max_rolls: Option<usize>,
    rolls: usize,
    roller: R,
}

impl<R: Roller> RollContext<R> {
    pub fn new(max_rolls: Option<usize>, roller: R) -> Self {
        Self {
            max_rolls,
            rolls: 0,
            roller,
        }
    }

    pub fn new_bounded(max_rolls: usize, roller: R) -> Self {
        Self::new(Some(max_rolls), roller)
    }

    pub fn new_unbounded(roller: R) -> Self {
        Self::new(None, roller)
    }

    pub fn from_config(config: &RollConfig, roller: R) -> Self {
        Self::new(config.max_rolls, roller)
    }

    /// Dice rolled since creation or the last [RollContext::reset].
    pub fn rolls(&self) -> usize {
        self.rolls
    }

    pub fn reset(&mut self) {
        self.rolls = 0;
    }

    pub fn into_roller(self) -> R {
        self.roller
    }

    fn count_rolls(&mut self, n: usize) -> RResult<()> {
        let requested = self.rolls.saturating_add(n);
        match self.max_rolls {
            Some(max) if requested > max => Err(RollError::TooManyRolls { requested, max }),
            _ => {
                self.rolls = requested;
                Ok(())
            }
        }
    }

    /// Rolls `num` dice of `sides`, in roll order.
    pub fn roll(&mut self, num: Num, sides: Sides) -> RResult<NonEmpty<UInt>> {
        self.count_rolls(num.get())?;

        let faces = sides.faces();
        let mut values = vec1![self.roller.roll(faces)];
        for _ in 1..num.get() {
            values.push(self.roller.roll(faces));
        }
        Ok(values)
    }

    pub fn eval(&mut self, expr: &DiceExpression) -> RResult<RolledSet> {
        let sides = expr.resolved_sides();
        let values = self.roll(expr.count(), sides)?;
        let set = RolledSet::new(values, sides, &expr.selection(), expr.modifier());

        tracing::debug!(
            expression = %expr,
            sides = %sides,
            rolls = ?set.raw_rolls(),
            total = set.total(),
            "evaluated dice expression"
        );
        Ok(set)
    }
}

impl Default for RollContext {
    fn default() -> Self {
        Self::from_config(&RollConfig::default(), rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::roller::{ReplayRoller, StepRoller};
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn mock_roller() -> StepRoller {
        StepRoller::new(NonZeroUInt::new(10).unwrap(), 1)
    }

    fn check(s: &str, expected: Int) {
        let mut ctx = RollContext::new_bounded(1000, mock_roller());
        let expr = crate::parse::parse(s).unwrap();
        assert_eq!(ctx.eval(&expr).unwrap().total(), expected);
    }

    fn replay(s: &str, draws: Vec<UInt>) -> RolledSet {
        let roller = ReplayRoller::try_from_vec(draws).unwrap();
        let mut ctx = RollContext::new_unbounded(roller);
        ctx.eval(&crate::parse::parse(s).unwrap()).unwrap()
    }

    #[test]
    fn test_eval_dice() {
        check("1d20", 10);
        check("1d20+4", 10 + 4);
        check("2d4", 2 + 3);
        check("8d6", 4 + 5 + 6 + 1 + 2 + 3 + 4 + 5);
    }

    #[test]
    fn test_eval_selection() {
        check("2d20kh1", 11);
        check("2d20kl1", 10);
        check("4d6dl1", 4 + 5 + 6);
        check("4d6dl9", 6);
    }

    #[test]
    fn test_eval_steps() {
        let set = replay("1d20+d", vec![18]);
        assert_eq!(set.resolved_sides(), Sides::poly(24).unwrap());
        assert_eq!(set.total(), 18);

        let set = replay("1d3-d5", vec![3]);
        assert_eq!(set.resolved_sides(), Sides::poly(3).unwrap());

        let set = replay("1d9+d2", vec![9]);
        assert_eq!(set.resolved_sides(), Sides::poly(9).unwrap());
    }

    #[test]
    fn test_eval_percentile() {
        let set = replay("1d%", vec![73]);
        assert_eq!(set.resolved_sides(), Sides::Percentile);
        assert_eq!(set.total(), 73);
    }

    #[test]
    fn test_err_too_many_rolls() {
        let mut ctx = RollContext::new_bounded(10, mock_roller());
        let expr = crate::parse::parse("6d6").unwrap();
        assert!(ctx.eval(&expr).is_ok());
        assert_eq!(
            ctx.eval(&expr).unwrap_err(),
            RollError::TooManyRolls { requested: 12, max: 10 }
        );
        assert_eq!(ctx.rolls(), 6);

        ctx.reset();
        assert!(ctx.eval(&expr).is_ok());
    }

    #[test]
    fn test_budget_checked_before_drawing() {
        let roller = ReplayRoller::try_from_vec(vec![1, 2, 3]).unwrap();
        let mut ctx = RollContext::new_bounded(2, roller);
        assert!(ctx.eval(&crate::parse::parse("3d6").unwrap()).is_err());
        assert_eq!(ctx.into_roller().consumed(), 0);
    }

    proptest! {
        #[test]
        fn prop_seeded_eval_is_deterministic(seed in any::<u64>(), count in 1usize..20, faces in 2u32..40) {
            let expr = crate::parse::parse(&format!("{}d{}dl1", count, faces)).unwrap();
            let a = RollContext::new_unbounded(StdRng::seed_from_u64(seed)).eval(&expr).unwrap();
            let b = RollContext::new_unbounded(StdRng::seed_from_u64(seed)).eval(&expr).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_kept_and_dropped_partition_raw(seed in any::<u64>(), count in 1usize..20, n in 1usize..25, kind in 0u8..3) {
            let selector = ["kh", "kl", "dl"][kind as usize];
            let expr = crate::parse::parse(&format!("{}d6{}{}", count, selector, n)).unwrap();
            let set = RollContext::new_unbounded(StdRng::seed_from_u64(seed)).eval(&expr).unwrap();

            let mut joined = set.kept_rolls();
            joined.extend(set.dropped_rolls());
            joined.sort_unstable();
            let mut raw = set.raw_rolls();
            raw.sort_unstable();
            prop_assert_eq!(joined, raw);
            prop_assert_eq!(set.dice().iter().filter(|d| d.kept).count(), set.kept_rolls().len());
            prop_assert!(!set.kept_rolls().is_empty());
        }
    }
}
