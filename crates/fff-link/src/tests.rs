//! Unit tests for fff-link.
//!
//! All tests use hand-built cyclists with `buffer(v) = 0.5 + v + 0.5`.

use fff_core::{CyclistId, SimTime};
use fff_cyclist::{Cyclist, Kinematics};

use crate::Segment;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn cyclist(id: u32) -> Cyclist {
    Cyclist::new(CyclistId(id), 5.0, 0.5, 1.0, 0.5).unwrap()
}

fn cyclist_exiting_at(id: u32, secs: f64) -> Cyclist {
    let mut c = cyclist(id);
    c.set_earliest_exit(SimTime::from_secs(secs));
    c
}

/// One pseudolane, 10 m: total lane length 10.
fn ten_metre_segment() -> Segment {
    Segment::from_pseudo_lane_count("s", 1, 10.0).unwrap()
}

fn roomy_segment() -> Segment {
    Segment::from_pseudo_lane_count("roomy", 3, 100.0).unwrap()
}

fn t(secs: f64) -> SimTime {
    SimTime::from_secs(secs)
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use crate::{LinkError, Segment, pseudo_lanes_for_width, split_into_chain};

    #[test]
    fn width_to_lane_derivation() {
        assert_eq!(pseudo_lanes_for_width(2.0, 0.5, 0.5).unwrap(), 4);
        // A path exactly as wide as its dead space still has one lane.
        assert_eq!(pseudo_lanes_for_width(0.5, 0.5, 0.5).unwrap(), 1);
        assert_eq!(pseudo_lanes_for_width(1.24, 0.4, 1.25).unwrap(), 1);
        assert_eq!(pseudo_lanes_for_width(1.9, 0.4, 1.25).unwrap(), 2);
    }

    #[test]
    fn from_width_builds_psi_lanes() {
        let seg = Segment::from_width("w", 2.0, 25.0, 0.5, 0.5).unwrap();
        assert_eq!(seg.id(), "w");
        assert_eq!(seg.number_of_pseudo_lanes(), 4);
        assert_eq!(seg.length(), 25.0);
        assert_eq!(seg.total_lane_length(), 100.0);
        for i in 0..4 {
            assert_eq!(seg.pseudo_lane(i).length(), 25.0);
        }
        assert_eq!(seg.occupied_space(), 0.0);
        assert!(!seg.is_full());
    }

    #[test]
    fn storage_capacity_in_pce() {
        let seg = Segment::from_pseudo_lane_count("p", 2, 40.0).unwrap();
        assert_eq!(seg.storage_capacity(0.25), 20.0);
    }

    #[test]
    fn split_uneven_length() {
        let chain = split_into_chain("l", 1, 100.0, 30.0).unwrap();
        assert_eq!(chain.len(), 4);
        for (i, seg) in chain.iter().enumerate() {
            assert_eq!(seg.length(), 25.0);
            assert_eq!(seg.id(), format!("l_part_{}", i + 1));
        }
    }

    #[test]
    fn split_exact_multiple() {
        let chain = split_into_chain("l", 2, 90.0, 30.0).unwrap();
        assert_eq!(chain.len(), 3);
        assert!(chain.iter().all(|s| s.length() == 30.0));
        assert!(chain.iter().all(|s| s.number_of_pseudo_lanes() == 2));
    }

    #[test]
    fn split_short_link_is_single_part() {
        let chain = split_into_chain("short", 1, 12.0, 30.0).unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].id(), "short_part_1");
        assert_eq!(chain[0].length(), 12.0);
    }

    #[test]
    fn split_parts_track_occupancy_independently() {
        let mut chain = split_into_chain("l", 1, 20.0, 10.0).unwrap();
        let token = chain[0].enter(&super::cyclist(0), 5.0);
        assert_eq!(chain[0].occupied_space(), 6.0);
        assert_eq!(chain[1].occupied_space(), 0.0);
        chain[0].leave(token);
    }

    #[test]
    fn rejects_bad_geometry() {
        assert!(matches!(
            Segment::from_width("w", 0.0, 10.0, 0.5, 0.5),
            Err(LinkError::InvalidGeometry { what: "width", .. })
        ));
        assert!(matches!(
            Segment::from_width("w", 1.0, -1.0, 0.5, 0.5),
            Err(LinkError::InvalidGeometry { what: "length", .. })
        ));
        assert!(matches!(
            Segment::from_width("w", 1.0, 10.0, 0.5, 0.0),
            Err(LinkError::InvalidGeometry { what: "lane width", .. })
        ));
        assert!(Segment::from_pseudo_lane_count("p", 1, f64::NAN).is_err());
        assert!(split_into_chain("l", 1, 100.0, 0.0).is_err());
    }

    #[test]
    fn rejects_zero_lanes() {
        assert!(matches!(
            Segment::from_pseudo_lane_count("p", 0, 10.0),
            Err(LinkError::ZeroPseudoLanes { ref id }) if id == "p"
        ));
        // Dead space wider than the path by more than a lane.
        assert!(matches!(
            Segment::from_width("narrow", 0.1, 10.0, 1.0, 0.5),
            Err(LinkError::ZeroPseudoLanes { ref id }) if id == "narrow"
        ));
        assert!(split_into_chain("l", 0, 10.0, 5.0).is_err());
    }
}

// ── Occupancy ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod occupancy {
    use super::*;
    use crate::can_admit;

    #[test]
    fn admission_scenario() {
        let mut seg = ten_metre_segment();
        let a = cyclist(0);
        let b = cyclist(1);

        assert!(can_admit(&seg, &a, 5.0, t(0.0)));
        let token_a = seg.enter(&a, 5.0);
        assert_eq!(seg.occupied_space(), 6.0);
        assert!(!seg.is_full());

        // B needs 5 m at speed 4; only 4 m remain.
        assert_eq!(b.safety_buffer(4.0), 5.0);
        assert!(!can_admit(&seg, &b, 4.0, t(0.0)));

        assert_eq!(seg.leave(token_a), CyclistId(0));
        assert_eq!(seg.occupied_space(), 0.0);
        assert!(can_admit(&seg, &b, 4.0, t(0.0)));
        let token_b = seg.enter(&b, 4.0);
        assert_eq!(seg.occupied_space(), 5.0);
        seg.leave(token_b);
    }

    #[test]
    fn conservation_over_interleaved_sequence() {
        let mut seg = roomy_segment();
        let cyclists: Vec<Cyclist> = (0..8).map(cyclist).collect();
        let speeds = [5.0, 3.3, 4.7, 1.1, 6.2, 2.9, 0.7, 5.5];

        let base = seg.enter(&cyclists[7], speeds[7]);
        let before = seg.occupied_space();

        let mut tokens: Vec<_> = cyclists[..7]
            .iter()
            .zip(speeds)
            .map(|(c, v)| seg.enter(c, v))
            .collect();
        assert!(seg.occupied_space() > before);

        // Release in a different order than entry.
        tokens.reverse();
        let last = tokens.remove(3);
        for token in tokens {
            seg.leave(token);
        }
        seg.leave(last);

        assert!((seg.occupied_space() - before).abs() < 1e-9);
        seg.leave(base);
        assert_eq!(seg.occupied_space(), 0.0);
    }

    #[test]
    fn token_releases_charged_buffer() {
        let mut seg = roomy_segment();
        let token = seg.enter(&cyclist(3), 2.0);
        assert_eq!(token.cyclist(), CyclistId(3));
        assert_eq!(token.speed(), 2.0);
        assert_eq!(token.buffer(), 3.0);
        seg.leave(token);
        assert_eq!(seg.occupied_space(), 0.0);
    }

    #[test]
    fn fullness_turns_on_and_off() {
        let mut seg = ten_metre_segment();
        let t0 = seg.enter(&cyclist(0), 5.0); // 6
        assert!(!seg.is_full());
        let t1 = seg.enter(&cyclist(1), 3.0); // 6 + 4 = 10
        assert!(seg.is_full());
        assert_eq!(seg.remaining_space(), 0.0);

        seg.leave(t1);
        assert!(!seg.is_full());
        assert_eq!(seg.remaining_space(), 4.0);
        seg.leave(t0);
    }

    #[test]
    fn entry_may_overshoot_capacity() {
        let mut seg = ten_metre_segment();
        let t0 = seg.enter(&cyclist(0), 5.0);
        let t1 = seg.enter(&cyclist(1), 5.0); // 12 > 10
        assert!(seg.is_full());
        assert_eq!(seg.remaining_space(), 0.0);
        seg.leave(t0);
        assert!(!seg.is_full());
        seg.leave(t1);
    }

    #[test]
    #[should_panic(expected = "entered full segment")]
    fn enter_full_segment_panics() {
        let mut seg = ten_metre_segment();
        let _a = seg.enter(&cyclist(0), 9.0);
        let _b = seg.enter(&cyclist(1), 0.0);
    }

    #[test]
    #[should_panic(expected = "twice")]
    fn double_entry_panics() {
        let mut seg = roomy_segment();
        let _a = seg.enter(&cyclist(0), 1.0);
        let _b = seg.enter(&cyclist(0), 1.0);
    }

    #[test]
    #[should_panic(expected = "another segment")]
    fn foreign_token_panics() {
        let mut s1 = roomy_segment();
        let mut s2 = roomy_segment();
        let token = s1.enter(&cyclist(0), 1.0);
        s2.leave(token);
    }

    #[test]
    #[should_panic(expected = "at speed")]
    fn negative_speed_panics() {
        let mut seg = roomy_segment();
        let _a = seg.enter(&cyclist(0), -1.0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut seg = roomy_segment();
        let _a = seg.enter(&cyclist_exiting_at(0, 1.0), 1.0);
        let _b = seg.enter(&cyclist_exiting_at(1, 2.0), 1.0);
        let _c = seg.enter(&cyclist_exiting_at(2, 3.0), 1.0);
        seg.promote_eligible(t(1.0));

        let mut removed = seg.clear();
        removed.sort();
        assert_eq!(removed, vec![CyclistId(0), CyclistId(1), CyclistId(2)]);
        assert_eq!(seg.occupied_space(), 0.0);
        assert_eq!(seg.occupant_count(), 0);
        assert!(seg.has_no_departures());
        assert!(seg.peek_next_to_leave().is_none());
    }

    #[test]
    #[should_panic(expected = "predates a clear")]
    fn token_from_before_clear_panics_after_reentry() {
        let mut seg = roomy_segment();
        let stale = seg.enter(&cyclist(0), 1.0);
        seg.clear();
        let _fresh = seg.enter(&cyclist(0), 5.0);
        seg.leave(stale);
    }
}

// ── Ordering ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ordering {
    use super::*;

    #[test]
    fn earliest_exit_first_not_fifo() {
        let mut seg = roomy_segment();
        let slow = cyclist_exiting_at(0, 30.0);
        let fast = cyclist_exiting_at(1, 12.0);
        let mid = cyclist_exiting_at(2, 20.0);
        let _t0 = seg.enter(&slow, 1.0);
        let _t1 = seg.enter(&fast, 5.0);
        let _t2 = seg.enter(&mid, 3.0);

        assert_eq!(seg.peek_next_to_leave(), Some(CyclistId(1)));
        assert_eq!(seg.wake_up_time(), t(12.0));
        assert_eq!(seg.residents().collect::<Vec<_>>(), vec![CyclistId(1), CyclistId(2), CyclistId(0)]);
        assert_eq!(seg.pop_next_to_leave(), Some(CyclistId(1)));
        assert_eq!(seg.pop_next_to_leave(), Some(CyclistId(2)));
        assert_eq!(seg.pop_next_to_leave(), Some(CyclistId(0)));
        assert_eq!(seg.pop_next_to_leave(), None);
    }

    #[test]
    fn pop_keeps_space_charged() {
        let mut seg = roomy_segment();
        let token = seg.enter(&cyclist(0), 5.0);
        seg.pop_next_to_leave();
        assert_eq!(seg.occupied_space(), 6.0);
        assert!(seg.contains(CyclistId(0)));
        assert!(!seg.is_resident(CyclistId(0)));
        seg.leave(token);
        assert!(!seg.contains(CyclistId(0)));
    }

    #[test]
    fn ties_resolve_by_entry_order() {
        let mut seg = roomy_segment();
        let _tokens: Vec<_> = [4, 2, 9, 0]
            .into_iter()
            .map(|id| seg.enter(&cyclist_exiting_at(id, 10.0), 1.0))
            .collect();
        let order: Vec<_> = std::iter::from_fn(|| seg.pop_next_to_leave()).collect();
        assert_eq!(order, vec![CyclistId(4), CyclistId(2), CyclistId(9), CyclistId(0)]);
    }

    #[test]
    fn reschedule_updates_next_peek() {
        let mut seg = roomy_segment();
        let mut a = cyclist_exiting_at(0, 5.0);
        let b = cyclist_exiting_at(1, 8.0);
        let _ta = seg.enter(&a, 1.0);
        let _tb = seg.enter(&b, 1.0);
        assert_eq!(seg.peek_next_to_leave(), Some(CyclistId(0)));

        seg.reschedule(&mut a, t(9.0));
        assert_eq!(a.earliest_exit(), t(9.0));
        assert_eq!(seg.peek_next_to_leave(), Some(CyclistId(1)));
        assert_eq!(seg.resident_count(), 2);

        seg.reschedule(&mut a, t(1.0));
        assert_eq!(seg.peek_next_to_leave(), Some(CyclistId(0)));
        assert_eq!(seg.wake_up_time(), t(1.0));
    }

    #[test]
    fn reschedule_to_tie_keeps_entry_order() {
        let mut seg = roomy_segment();
        let a = cyclist_exiting_at(0, 5.0);
        let mut b = cyclist_exiting_at(1, 8.0);
        let _ta = seg.enter(&a, 1.0);
        let _tb = seg.enter(&b, 1.0);
        seg.reschedule(&mut b, t(5.0));
        assert_eq!(seg.peek_next_to_leave(), Some(CyclistId(0)));
    }

    #[test]
    fn direct_time_change_is_not_seen_by_the_ordering() {
        let mut seg = roomy_segment();
        let mut a = cyclist_exiting_at(0, 5.0);
        let b = cyclist_exiting_at(1, 8.0);
        let _ta = seg.enter(&a, 1.0);
        let _tb = seg.enter(&b, 1.0);

        // Bypassing the segment leaves the stored key behind, and that is
        // visible through scheduled_exit.
        a.set_earliest_exit(t(20.0));
        assert_eq!(seg.scheduled_exit(CyclistId(0)), Some(t(5.0)));
        assert_ne!(seg.scheduled_exit(CyclistId(0)), Some(a.earliest_exit()));

        seg.reschedule(&mut a, t(20.0));
        assert_eq!(seg.scheduled_exit(CyclistId(0)), Some(t(20.0)));
        assert_eq!(seg.peek_next_to_leave(), Some(CyclistId(1)));
    }

    #[test]
    fn scheduled_exit_only_for_residents() {
        let mut seg = roomy_segment();
        let _ta = seg.enter(&cyclist_exiting_at(0, 3.0), 1.0);
        assert_eq!(seg.scheduled_exit(CyclistId(0)), Some(t(3.0)));
        seg.pop_next_to_leave();
        assert_eq!(seg.scheduled_exit(CyclistId(0)), None);
        assert_eq!(seg.scheduled_exit(CyclistId(9)), None);
    }

    #[test]
    fn wake_up_time_falls_back_to_last_move() {
        let mut seg = roomy_segment();
        assert_eq!(seg.wake_up_time(), SimTime::ZERO);
        seg.set_last_time_moved(t(7.0));
        assert_eq!(seg.wake_up_time(), t(7.0));

        let _ta = seg.enter(&cyclist_exiting_at(0, 12.0), 1.0);
        assert_eq!(seg.wake_up_time(), t(12.0));
        seg.promote_eligible(t(12.0));
        assert_eq!(seg.wake_up_time(), t(7.0));
    }

    #[test]
    fn reschedule_of_non_resident_only_updates_cyclist() {
        let mut seg = roomy_segment();
        let mut outsider = cyclist(7);
        seg.reschedule(&mut outsider, t(42.0));
        assert_eq!(outsider.earliest_exit(), t(42.0));
        assert_eq!(seg.resident_count(), 0);
    }

    #[test]
    fn promote_moves_only_eligible_in_exit_order() {
        let mut seg = roomy_segment();
        let _a = seg.enter(&cyclist_exiting_at(0, 7.0), 1.0);
        let _b = seg.enter(&cyclist_exiting_at(1, 3.0), 1.0);
        let _c = seg.enter(&cyclist_exiting_at(2, 5.0), 1.0);

        assert_eq!(seg.promote_eligible(t(5.0)), 2);
        assert_eq!(seg.dequeue_departure(), Some(CyclistId(1)));
        assert_eq!(seg.dequeue_departure(), Some(CyclistId(2)));
        assert_eq!(seg.dequeue_departure(), None);
        assert_eq!(seg.peek_next_to_leave(), Some(CyclistId(0)));
    }
}

// ── Departure FIFO ────────────────────────────────────────────────────────────

#[cfg(test)]
mod departures {
    use super::*;

    #[test]
    fn fifo_isolated_from_resident_ordering() {
        let mut seg = roomy_segment();
        let mut early = cyclist_exiting_at(0, 1.0);
        let late = cyclist_exiting_at(1, 50.0);
        let t_early = seg.enter(&early, 1.0);
        let _t_late = seg.enter(&late, 1.0);

        let head = seg.pop_next_to_leave().unwrap();
        seg.queue_for_departure(head);
        assert_eq!(seg.first_departure(), Some(CyclistId(0)));
        assert!(!seg.has_no_departures());

        // Even an earlier exit time does not bring it back into the ordering.
        seg.reschedule(&mut early, t(0.0));
        assert_eq!(seg.peek_next_to_leave(), Some(CyclistId(1)));
        assert_eq!(seg.resident_count(), 1);

        // Released straight from the FIFO.
        seg.leave(t_early);
        assert!(seg.has_no_departures());
        assert_eq!(seg.occupied_space(), 3.0);
    }

    #[test]
    fn dequeue_is_strict_fifo() {
        let mut seg = roomy_segment();
        // Exit times deliberately out of id order.
        let _tokens: Vec<_> = [(0, 9.0), (1, 2.0), (2, 4.0)]
            .into_iter()
            .map(|(id, exit)| seg.enter(&cyclist_exiting_at(id, exit), 1.0))
            .collect();

        // Queued in exit order: 1, 2, 0.
        for _ in 0..3 {
            let id = seg.pop_next_to_leave().unwrap();
            seg.queue_for_departure(id);
        }
        assert_eq!(seg.departure_count(), 3);
        assert_eq!(seg.dequeue_departure(), Some(CyclistId(1)));
        assert_eq!(seg.dequeue_departure(), Some(CyclistId(2)));
        assert_eq!(seg.dequeue_departure(), Some(CyclistId(0)));
        assert!(seg.has_no_departures());
        assert_eq!(seg.occupant_count(), 3);
    }

    #[test]
    #[should_panic(expected = "without being popped first")]
    fn queueing_a_resident_panics() {
        let mut seg = roomy_segment();
        let _t = seg.enter(&cyclist(0), 1.0);
        seg.queue_for_departure(CyclistId(0));
    }

    #[test]
    #[should_panic(expected = "is not on")]
    fn queueing_a_stranger_panics() {
        let mut seg = roomy_segment();
        seg.queue_for_departure(CyclistId(3));
    }

    #[test]
    fn last_time_moved_roundtrip() {
        let mut seg = roomy_segment();
        assert_eq!(seg.last_time_moved(), SimTime::ZERO);
        seg.set_last_time_moved(t(17.5));
        assert_eq!(seg.last_time_moved(), t(17.5));
    }
}

// ── Admission policy ──────────────────────────────────────────────────────────

#[cfg(test)]
mod admission {
    use super::*;
    use crate::{Admission, can_admit, evaluate};

    #[test]
    fn free_speed_when_space_allows() {
        let seg = roomy_segment();
        assert_eq!(evaluate(&seg, &cyclist(0), t(0.0)), Admission::Admit { speed: 5.0 });
    }

    #[test]
    fn forced_to_follow_at_lower_speed() {
        let mut seg = ten_metre_segment();
        let _a = seg.enter(&cyclist(0), 5.0); // 4 m left
        let decision = evaluate(&seg, &cyclist(1), t(0.0));
        // 0.5 + v + 0.5 <= 4  =>  v = 3
        assert_eq!(decision, Admission::Admit { speed: 3.0 });
        assert!(decision.is_admit());
    }

    #[test]
    fn not_yet_eligible() {
        let seg = roomy_segment();
        let c = cyclist_exiting_at(0, 10.0);
        assert_eq!(evaluate(&seg, &c, t(9.0)), Admission::NotYetEligible { until: t(10.0) });
        assert!(!can_admit(&seg, &c, 1.0, t(9.0)));
        assert!(can_admit(&seg, &c, 1.0, t(10.0)));
    }

    #[test]
    fn full_and_does_not_fit() {
        let mut seg = ten_metre_segment();
        let a = seg.enter(&cyclist(0), 8.5); // 9.5 m, 0.5 m left
        assert_eq!(evaluate(&seg, &cyclist(1), t(0.0)), Admission::DoesNotFit);
        let b = seg.enter(&cyclist(1), 0.0); // 10.5 m
        assert_eq!(evaluate(&seg, &cyclist(2), t(0.0)), Admission::Full);
        assert!(!can_admit(&seg, &cyclist(2), 0.0, t(0.0)));
        seg.leave(a);
        seg.leave(b);
    }

    #[test]
    fn empty_segment_takes_a_cyclist_longer_than_itself() {
        // Standing buffer 0.5 + 0.5 = 1.0 m on 0.8 m of lane.
        let mut stub = Segment::from_pseudo_lane_count("stub", 1, 0.8).unwrap();
        assert_eq!(evaluate(&stub, &cyclist(0), t(0.0)), Admission::Admit { speed: 5.0 });

        let a = stub.enter(&cyclist(0), 5.0);
        assert!(stub.is_full());
        assert_eq!(evaluate(&stub, &cyclist(1), t(0.0)), Admission::Full);

        stub.leave(a);
        assert_eq!(stub.occupied_space(), 0.0);
        assert!(evaluate(&stub, &cyclist(1), t(0.0)).is_admit());
    }
}

// ── Link table ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::{Cursor, Write};

    use fff_core::FffConfig;

    use crate::{LaneSpec, LinkError, PhysicalLink, load_links_csv, load_links_reader};

    const TABLE: &str = "id,length,width,pseudo_lanes\n\
                         main_st,240.0,2.3,\n\
                         bridge,90.0,,2\n\
                         both,50.0,9.0,1\n";

    #[test]
    fn parses_width_and_lane_rows() {
        let links = load_links_reader(Cursor::new(TABLE)).unwrap();
        assert_eq!(links.len(), 3);
        assert_eq!(links[0], PhysicalLink::new("main_st", 240.0, LaneSpec::Width(2.3)));
        assert_eq!(links[1].lanes, LaneSpec::PseudoLanes(2));
        // Explicit lane count wins over width.
        assert_eq!(links[2].lanes, LaneSpec::PseudoLanes(1));
    }

    #[test]
    fn missing_cross_section_is_a_parse_error() {
        let csv = "id,length,width,pseudo_lanes\nx,10.0,,\n";
        assert!(matches!(load_links_reader(Cursor::new(csv)), Err(LinkError::Parse(_))));
    }

    #[test]
    fn malformed_number_is_a_parse_error() {
        let csv = "id,length,width,pseudo_lanes\nx,ten,1.0,\n";
        assert!(matches!(load_links_reader(Cursor::new(csv)), Err(LinkError::Parse(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TABLE.as_bytes()).unwrap();
        let links = load_links_csv(file.path()).unwrap();
        assert_eq!(links.len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_links_csv(std::path::Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(LinkError::Io(_))));
    }

    #[test]
    fn physical_link_builds_split_chain() {
        let config = FffConfig {
            dead_space_m: 0.4,
            efficient_lane_width_m: 1.25,
            max_segment_length_m: 60.0,
            ..FffConfig::default()
        };
        // 1 + floor((2.3 - 0.4) / 1.25) = 2 lanes; 240 / 60 = 4 parts.
        let chain = PhysicalLink::new("main_st", 240.0, LaneSpec::Width(2.3)).build(&config).unwrap();
        assert_eq!(chain.len(), 4);
        assert!(chain.iter().all(|s| s.number_of_pseudo_lanes() == 2 && s.length() == 60.0));
    }

    #[test]
    fn physical_link_rejects_bad_config() {
        let config = FffConfig { max_segment_length_m: 0.0, ..FffConfig::default() };
        let result = PhysicalLink::new("x", 10.0, LaneSpec::PseudoLanes(1)).build(&config);
        assert!(matches!(result, Err(LinkError::Config(_))));
    }

    #[test]
    fn physical_link_names_itself_in_lane_errors() {
        let result = PhysicalLink::new("alley", 10.0, LaneSpec::Width(0.01))
            .build(&FffConfig { dead_space_m: 2.0, ..FffConfig::default() });
        assert!(matches!(result, Err(LinkError::ZeroPseudoLanes { ref id }) if id == "alley"));
    }
}
