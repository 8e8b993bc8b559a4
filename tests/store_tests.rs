//! Turn store tests.
//!
//! The store is where play actions meet the engine:
//! - Gating Babe and Effect plays
//! - Bind moves and their undo
//! - Stroke ledger
//! - End of turn and carry-over
//! - Snapshots

use babes_engine::cards::{BabeCard, BabeType};
use babes_engine::core::{BabeId, EffectId, RulesConfig, Zone};
use babes_engine::effects::{
    EffectScript, FutureClause, LimitMod, OnRemoveClause, Requirement, ScoreOp, TargetBinding,
    TargetDecl,
};
use babes_engine::error::{PlayError, StoreError};
use babes_engine::rules::Ineligible;
use babes_engine::zones::TurnStore;

fn card(id: u32, name: &str, babe_type: BabeType, base: i64) -> BabeCard {
    BabeCard::new(BabeId::new(id), name, babe_type, base)
}

/// A full turn: play, score, end, and the carry-over lands next turn.
#[test]
fn test_turn_cycle() {
    let mut store = TurnStore::default();
    store.play_babe(card(1, "Roxy", BabeType::Baddie, 8)).unwrap();
    store.play_babe(card(2, "Mia", BabeType::Busty, 6)).unwrap();

    let later = EffectScript::new(EffectId::new(1), "Rain Check")
        .with_op(ScoreOp::final_add(2.0))
        .with_future(FutureClause { next_add: 30.0, ..FutureClause::default() });
    store.play_effect(later, TargetBinding::empty()).unwrap();
    assert_eq!(store.report().final_score(), 16);

    let pending = store.end_turn().expect("carry-over");
    assert_eq!(pending.add_next, 30.0);

    let state = store.state();
    assert_eq!(state.turn_number, 2);
    assert!(state.played_babes.is_empty());
    assert!(state.played_effects.is_empty());
    assert_eq!(state.discard.len(), 2);
    assert_eq!(store.discarded_effects().len(), 1);
    assert_eq!(store.report().final_score(), 30);

    // Nothing carries past the following turn
    assert!(store.end_turn().is_none());
    assert_eq!(store.report().final_score(), 0);
}

/// A Babe promised a free replay does not use a slot, once.
#[test]
fn test_free_replay() {
    let mut store = TurnStore::default();
    store.play_babe(card(1, "Roxy", BabeType::Baddie, 8)).unwrap();

    let encore = EffectScript::new(EffectId::new(1), "Encore")
        .with_target(TargetDecl::one_babe())
        .with_future(FutureClause { replay_targets: true, ..FutureClause::default() });
    store.play_effect(encore, TargetBinding::targets([BabeId::new(1)])).unwrap();
    store.end_turn();

    store.play_babe(card(2, "A", BabeType::Alt, 1)).unwrap();
    store.play_babe(card(3, "B", BabeType::Alt, 1)).unwrap();
    store.play_babe(card(1, "Roxy", BabeType::Baddie, 8)).unwrap();
    assert_eq!(
        store.play_babe(card(1, "Roxy", BabeType::Baddie, 8)),
        Err(PlayError::BabeLimitReached { limit: 2 })
    );
    assert_eq!(store.report().breakdown.final_before, 10);
}

/// A replayed Babe leaves the discard pile, so requirements stop seeing her there.
#[test]
fn test_replay_leaves_discard() {
    let mut store = TurnStore::default();
    store.play_babe(card(1, "Roxy", BabeType::Baddie, 8)).unwrap();
    let encore = EffectScript::new(EffectId::new(1), "Encore")
        .with_target(TargetDecl::one_babe())
        .with_future(FutureClause { replay_targets: true, ..FutureClause::default() });
    store.play_effect(encore, TargetBinding::targets([BabeId::new(1)])).unwrap();
    store.end_turn();

    let reunion = EffectScript::new(EffectId::new(2), "Reunion")
        .with_requirement(Requirement::DiscardHasBabe { name: "Roxy".into() });
    assert!(store.can_play_effect(&reunion).is_ok());

    store.play_babe(card(1, "Roxy", BabeType::Baddie, 8)).unwrap();
    assert!(store.state().discard.is_empty());
    assert_eq!(store.state().played_babes.len(), 1);
    assert_eq!(
        store.can_play_effect(&reunion),
        Err(PlayError::Ineligible(Ineligible::MissingFromDiscard { name: "Roxy".into() }))
    );
}

/// Ignoring the Babe limit carries into the next turn only.
#[test]
fn test_ignore_babe_limit_next_turn() {
    let mut store = TurnStore::default();
    let open_house = EffectScript::new(EffectId::new(1), "Open House")
        .with_future(FutureClause { ignore_babe_limit_next: true, ..FutureClause::default() });
    store.play_effect(open_house, TargetBinding::empty()).unwrap();
    store.end_turn();

    for id in 0..4 {
        store.play_babe(card(id, "Guest", BabeType::Petite, 1)).unwrap();
    }
    store.end_turn();

    store.play_babe(card(10, "A", BabeType::Petite, 1)).unwrap();
    store.play_babe(card(11, "B", BabeType::Petite, 1)).unwrap();
    assert!(store.play_babe(card(12, "C", BabeType::Petite, 1)).is_err());
}

/// Refusals come back as typed errors with readable reasons.
#[test]
fn test_refusals() {
    let mut store = TurnStore::default();

    let solo = EffectScript::new(EffectId::new(1), "Solo")
        .with_requirement(Requirement::OnlyBabePlayed { name: "Roxy".into() });
    let err = store.play_effect(solo, TargetBinding::empty()).unwrap_err();
    assert_eq!(err, PlayError::Ineligible(Ineligible::NotOnlyBabe { name: "Roxy".into() }));
    assert_eq!(err.reason(), "Roxy must be the only babe played");

    let pick = EffectScript::new(EffectId::new(2), "Pick").with_target(TargetDecl::one_babe());
    store.play_babe(card(1, "Roxy", BabeType::Baddie, 8)).unwrap();
    let err = store.play_effect(pick, TargetBinding::empty()).unwrap_err();
    assert_eq!(err.reason(), "invalid target: choose exactly one babe, got 0");

    let goth_only = EffectScript::new(EffectId::new(3), "Goth Only")
        .with_limit(LimitMod::RestrictBabeTypeTo { babe_type: BabeType::Goth });
    assert!(matches!(
        store.play_effect(goth_only, TargetBinding::empty()),
        Err(PlayError::Ineligible(Ineligible::WrongTypeInPlay { .. }))
    ));
}

/// A type restriction in play blocks other types and only them.
#[test]
fn test_type_restriction() {
    let mut store = TurnStore::default();
    let goth_night = EffectScript::new(EffectId::new(1), "Goth Night")
        .with_limit(LimitMod::RestrictBabeTypeTo { babe_type: BabeType::Goth });
    store.play_effect(goth_night, TargetBinding::empty()).unwrap();

    assert_eq!(
        store.play_babe(card(1, "Mia", BabeType::Busty, 6)),
        Err(PlayError::BabeTypeRestricted { allowed: BabeType::Goth })
    );
    assert!(store.play_babe(card(2, "Raven", BabeType::Goth, 5)).is_ok());
}

/// Typed extra slots admit only their type.
#[test]
fn test_extra_type_slots() {
    let mut store = TurnStore::default();
    let milf_night = EffectScript::new(EffectId::new(1), "MILF Night")
        .with_limit(LimitMod::ExtraTypePlays { babe_type: BabeType::Milf, n: 1 });
    store.play_effect(milf_night, TargetBinding::empty()).unwrap();

    store.play_babe(card(1, "A", BabeType::Alt, 1)).unwrap();
    store.play_babe(card(2, "B", BabeType::Alt, 1)).unwrap();
    assert!(store.play_babe(card(3, "C", BabeType::Alt, 1)).is_err());
    assert!(store.play_babe(card(4, "D", BabeType::Milf, 1)).is_ok());
    assert!(store.play_babe(card(5, "E", BabeType::Milf, 1)).is_err());
}

/// Binding moves cards; removing the effect moves them back.
#[test]
fn test_bind_moves_and_undo() {
    let mut store = TurnStore::default();
    store.stock_deck([card(7, "Lucky", BabeType::Cosplay, 9)]);

    let summon = EffectScript::new(EffectId::new(1), "Summon")
        .with_target(TargetDecl::one_babe().in_zone(Zone::Deck))
        .with_on_bind(Zone::Play)
        .with_stroke_cost(2);
    let play_id = store
        .play_effect(summon, TargetBinding::targets([BabeId::new(7)]))
        .unwrap();

    assert!(store.state().deck.is_empty());
    assert_eq!(store.state().played_babes.len(), 1);
    assert!(store.state().played_babes[0].slot_free);
    assert_eq!(store.strokes_spent(), 2);
    assert_eq!(store.report().final_score(), 9);

    let removed = store.remove_effect(play_id).unwrap();
    assert_eq!(removed.moves.len(), 1);
    assert_eq!(store.state().deck.len(), 1);
    assert!(store.state().played_babes.is_empty());
    assert_eq!(store.strokes_spent(), 0);
}

/// A Babe brought into play by an effect counts as played for history checks.
#[test]
fn test_summoned_babe_enters_history() {
    let mut store = TurnStore::default();
    store.stock_deck([card(7, "Lady Luck", BabeType::Cosplay, 9)]);

    let summon = EffectScript::new(EffectId::new(1), "Summon")
        .with_target(TargetDecl::one_babe().in_zone(Zone::Deck))
        .with_on_bind(Zone::Play);
    store.play_effect(summon, TargetBinding::targets([BabeId::new(7)])).unwrap();
    assert_eq!(store.state().play_history.len(), 1);

    let old_flame = EffectScript::new(EffectId::new(2), "Old Flame")
        .with_requirement(Requirement::PlayedHistoryHasPrefix { prefix: "Lady".into() });
    assert!(store.can_play_effect(&old_flame).is_ok());
}

/// A removal clause can keep the moves and the strokes.
#[test]
fn test_removal_clause_keeps_moves() {
    let mut store = TurnStore::default();
    store.play_babe(card(1, "Roxy", BabeType::Baddie, 8)).unwrap();

    let banish = EffectScript::new(EffectId::new(1), "Banish")
        .with_target(TargetDecl::one_babe())
        .with_on_bind(Zone::Discard)
        .with_stroke_cost(1)
        .with_on_remove(OnRemoveClause { restore_moves: false, refund_strokes: false });
    let play_id = store
        .play_effect(banish, TargetBinding::targets([BabeId::new(1)]))
        .unwrap();
    assert_eq!(store.state().discard.len(), 1);

    store.remove_effect(play_id).unwrap();
    assert_eq!(store.state().discard.len(), 1);
    assert!(store.state().played_babes.is_empty());
    assert_eq!(store.strokes_spent(), 1);
}

/// Moving a Babe out of play and back restores her play ID.
#[test]
fn test_undo_restores_play_id() {
    let mut store = TurnStore::default();
    let roxy = store.play_babe(card(1, "Roxy", BabeType::Baddie, 8)).unwrap();

    let banish = EffectScript::new(EffectId::new(1), "Banish")
        .with_target(TargetDecl::one_babe())
        .with_on_bind(Zone::Discard);
    let play_id = store
        .play_effect(banish, TargetBinding::targets([BabeId::new(1)]))
        .unwrap();
    store.remove_effect(play_id).unwrap();

    assert_eq!(store.state().played_babes.len(), 1);
    assert_eq!(store.state().played_babes[0].play_id, roxy);
    assert!(store.state().discard.is_empty());
}

/// Removing a Babe sends her to the chosen zone.
#[test]
fn test_remove_babe() {
    let mut store = TurnStore::default();
    let id = store.play_babe(card(1, "Roxy", BabeType::Baddie, 8)).unwrap();

    let removed = store.remove_babe(id, Zone::Deck).unwrap();
    assert_eq!(removed.name, "Roxy");
    assert_eq!(store.state().deck.len(), 1);
    assert_eq!(store.remove_babe(id, Zone::Discard), Err(PlayError::UnknownPlay(id)));
    assert_eq!(store.state().play_history.len(), 1);

    let id = store.play_babe(card(2, "Mia", BabeType::Busty, 6)).unwrap();
    assert_eq!(store.remove_babe(id, Zone::Play), Err(PlayError::AlreadyInPlay(id)));
    assert_eq!(store.state().played_babes.len(), 1);
}

/// A snapshot restores the same store.
#[test]
fn test_snapshot_round_trip() {
    let mut store = TurnStore::new(RulesConfig::new().with_babe_limit(3));
    store.play_babe(card(1, "Roxy", BabeType::Baddie, 8)).unwrap();
    let encore = EffectScript::new(EffectId::new(1), "Encore")
        .with_target(TargetDecl::one_babe())
        .with_op(ScoreOp::babe_mult(2.0))
        .with_future(FutureClause { targets_next_turn_mult: Some(3.0), ..FutureClause::default() })
        .with_stroke_cost(1);
    store.play_effect(encore, TargetBinding::targets([BabeId::new(1)])).unwrap();

    let bytes = store.save().unwrap();
    let restored = TurnStore::load(&bytes).unwrap();

    assert_eq!(restored.state(), store.state());
    assert_eq!(restored.strokes_spent(), 1);
    assert_eq!(restored.engine().config().base_babe_limit, 3);
    assert_eq!(restored.report(), store.report());
}

/// Garbage bytes are a decode error, not a panic.
#[test]
fn test_snapshot_decode_error() {
    let err = TurnStore::load(&[0xff, 0x01]).unwrap_err();
    assert!(matches!(err, StoreError::Decode(_)));
}
