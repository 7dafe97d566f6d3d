use calcio_scores::model::score_for_status;
use calcio_scores::status::{KNOWN_STATUS_CODES, LivePhase, MatchStatus, canonical_status};

#[test]
fn every_known_code_maps_to_a_canonical_state() {
    for code in KNOWN_STATUS_CODES {
        let status = canonical_status(code);
        assert!(
            !matches!(status, MatchStatus::Other(_)),
            "{code} fell through to Other"
        );
    }
}

#[test]
fn provider_vocabularies_agree() {
    assert_eq!(canonical_status("FT"), canonical_status("FINISHED"));
    assert_eq!(canonical_status("FT"), canonical_status("Match Finished"));
    assert_eq!(canonical_status("HT"), canonical_status("PAUSED"));
    assert_eq!(canonical_status("PST"), canonical_status("Match Postponed"));
    assert_eq!(canonical_status("IN_PLAY"), MatchStatus::Live(LivePhase::InPlay));
    assert_eq!(canonical_status("  ns "), MatchStatus::Scheduled);
}

#[test]
fn unknown_codes_pass_through_verbatim() {
    let status = canonical_status(" Delayed ");
    assert_eq!(status, MatchStatus::Other("Delayed".to_string()));
    assert_eq!(status.canonical_name(), "Delayed");
    assert_eq!(status.label(), "Delayed");
    assert_eq!(status.has_started(), None);
}

#[test]
fn labels_are_italian() {
    assert_eq!(canonical_status("FT").label(), "Partita Finita");
    assert_eq!(canonical_status("HT").label(), "Intervallo");
    assert_eq!(canonical_status("NS").label(), "Non Iniziata");
}

#[test]
fn scores_follow_status() {
    assert!(score_for_status(&MatchStatus::Scheduled, Some(0), Some(0)).is_none());
    assert!(score_for_status(&MatchStatus::Postponed, Some(1), Some(0)).is_none());
    assert_eq!(
        score_for_status(&MatchStatus::Halftime, Some(1), Some(0)).map(|s| (s.home, s.away)),
        Some((1, 0))
    );
    assert!(score_for_status(&MatchStatus::Finished, Some(1), None).is_none());
    assert!(score_for_status(&MatchStatus::Other("X".into()), Some(2), Some(2)).is_some());
}
