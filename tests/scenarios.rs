use dice_chain::common::{Sides, UInt};
use dice_chain::parse::ParseErrorKind;
use dice_chain::table::TableError;
use dice_chain::{Error, RangeTable, ReplayRoller, Roll, RollContext};

fn roll(text: &str, draws: Vec<UInt>) -> Roll {
    let roller = ReplayRoller::try_from_vec(draws).unwrap();
    RollContext::new_unbounded(roller).roll_expression(text).unwrap()
}

fn d20_table(keys: &[&'static str]) -> RangeTable<&'static str> {
    RangeTable::new(keys.iter().map(|key| (*key, *key))).unwrap()
}

#[test]
fn drop_lowest_of_four_d6() {
    let roll = roll("4d6dl1", vec![2, 5, 6, 1]);
    assert_eq!(roll.result.raw_rolls(), [2, 5, 6, 1]);
    assert_eq!(roll.result.kept_rolls(), [2, 5, 6]);
    assert_eq!(roll.result.dropped_rolls(), [1]);
    assert_eq!(roll.result.subtotal(), 13);
    assert_eq!(roll.total(), 13);
}

#[test]
fn keep_highest_with_modifier() {
    let roll = roll("2d20k1+5", vec![14, 9]);
    assert_eq!(roll.result.kept_rolls(), [14]);
    assert_eq!(roll.result.subtotal(), 14);
    assert_eq!(roll.total(), 19);
}

#[test]
fn stepped_die_rolls_next_size_up() {
    let roll = roll("1d20+d", vec![18]);
    assert_eq!(roll.result.resolved_sides(), Sides::poly(24).unwrap());
    assert_eq!(roll.total(), 18);
}

#[test]
fn table_closed_ranges() {
    let table = d20_table(&["1", "2-11", "12-19", "20+"]);
    assert_eq!(*table.resolve(11).unwrap().1, "2-11");
}

#[test]
fn table_open_low_range() {
    let table = d20_table(&["1 or lower", "2-19", "20+"]);
    assert_eq!(*table.resolve(0).unwrap().1, "1 or lower");
}

#[test]
fn table_rejects_invalid_key() {
    let err = RangeTable::new([("1", 'a'), ("abc", 'b')]).unwrap_err();
    assert_eq!(err, TableError::InvalidKey { key: "abc".to_string() });
}

#[test]
fn table_overlap_prefers_smaller_lower_bound() {
    let table = d20_table(&["5-15", "1-10"]);
    assert_eq!(*table.resolve(7).unwrap().1, "1-10");
    assert!(table.check_disjoint().is_err());
}

#[test]
fn roll_on_table_through_session() {
    let table = RangeTable::new([("1", "fumble"), ("2-19", "hit"), ("20", "critical")]).unwrap();
    let mut ctx = RollContext::new_unbounded(ReplayRoller::try_from_vec(vec![20]).unwrap());
    let table_roll = dice_chain::roll_on_table(&mut ctx, "1d20", &table).unwrap();
    assert_eq!(*table_roll.payload, "critical");
    assert_eq!(table_roll.key.label(), "20");
}

#[test]
fn errors_convert_into_crate_error() {
    match dice_chain::parse("4d6dl0") {
        Err(Error::Parse(e)) => assert_eq!(e.kind, ParseErrorKind::InvalidSelection),
        other => panic!("unexpected {:?}", other),
    }
    assert!(matches!(dice_chain::parse("0d6"), Err(Error::Parse(_))));
}

#[test]
fn thread_rng_roll_stays_in_range() {
    for _ in 0..50 {
        let total = dice_chain::roll("3d6+2").unwrap().total();
        assert!((5..=20).contains(&total));
    }
}
