//! Integration tests for dataset loading and the booking writer

use room_occupancy::core::calendar::{TimeOfDay, WeekSet};
use room_occupancy::core::conflicts::{find_conflicts, ConflictQuery, SemesterScope};
use room_occupancy::core::models::{
    Classroom, RoomType, SectionSummary, Semester, TimeSlot, WeekRange, Weekday,
};
use room_occupancy::core::repository::{
    load_dataset, parse_dataset, MemoryStore, NewOccupation, OccupancyStore,
};
use room_occupancy::core::OccupancyError;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn at(hour: u16) -> TimeOfDay {
    TimeOfDay::from_hm(hour, 0).expect("valid hour")
}

fn sample_path() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("samples/campus.toml")
}

fn booking(room: &str, semester: &str, weeks: WeekRange, group: &str) -> NewOccupation {
    NewOccupation {
        classroom_ids: vec![room.to_string()],
        time_slot_id: "mon-09".to_string(),
        semester_id: semester.to_string(),
        weeks,
        section: SectionSummary::new("Sculpture", group, None),
    }
}

#[test]
fn test_load_sample_dataset() {
    let store = load_dataset(&sample_path(), 15).unwrap();

    assert_eq!(store.classrooms().unwrap().len(), 3);
    assert_eq!(store.occupation_count(), 5);

    let spring = store.get_semester("s2-2526").unwrap().unwrap();
    assert_eq!(spring.teaching_weeks, 15);
    assert_eq!(spring.name, "Spring 2026");

    let seminar = store.find_classroom_by_code("g.2.1").unwrap().unwrap();
    assert!(!seminar.is_available);
    assert_eq!(seminar.room_type, RoomType::Seminar);

    let monday = store.time_slots_on(Weekday::Monday).unwrap();
    let ids: Vec<&str> = monday.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["mon-09", "mon-11"]);

    let lab = store.list_occupations("room-p05", None, None).unwrap();
    assert_eq!(lab.len(), 2);
}

#[test]
fn test_default_teaching_weeks_apply_to_undeclared_semesters() {
    let store = load_dataset(&sample_path(), 12).unwrap();
    assert_eq!(store.get_semester("s1-2526").unwrap().unwrap().teaching_weeks, 15);
    assert_eq!(store.get_semester("s2-2526").unwrap().unwrap().teaching_weeks, 12);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let result = load_dataset(&dir.path().join("absent.toml"), 15);
    assert!(matches!(result, Err(OccupancyError::Io(_))));
}

#[test]
fn test_dataset_errors_from_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let cases = [
        (
            "semester number",
            "[[semesters]]\nid = \"s\"\nnumber = 3\nacademic_year = \"2025\"\n",
        ),
        (
            "duplicate code",
            "[[classrooms]]\nid = \"a\"\ncode = \"X\"\nname = \"A\"\ncapacity = 1\nroom_type = \"lecture\"\n\
             [[classrooms]]\nid = \"b\"\ncode = \"x\"\nname = \"B\"\ncapacity = 1\nroom_type = \"lecture\"\n",
        ),
        (
            "unknown semester",
            "[[occupations]]\nid = \"o\"\nclassroom_ids = []\ntime_slot_id = \"t\"\nsemester_id = \"s\"\n\
             subject_name = \"S\"\ngroup_code = \"G\"\n",
        ),
    ];

    for (name, contents) in cases {
        let path = dir.path().join(format!("{}.toml", name.replace(' ', "_")));
        fs::write(&path, contents).expect("Failed to write dataset");
        assert!(
            matches!(load_dataset(&path, 15), Err(OccupancyError::Dataset(_))),
            "{name}"
        );
    }
}

#[test]
fn test_unknown_fields_are_rejected() {
    assert!(matches!(
        parse_dataset("[[rooms]]\nid = \"x\"\n", 15),
        Err(OccupancyError::Toml(_))
    ));
}

#[test]
fn test_loaded_double_bookings_are_visible_to_audits() {
    let text = fs::read_to_string(sample_path()).unwrap()
        + "\n[[occupations]]\nid = \"dup\"\nclassroom_ids = [\"room-p14\"]\ntime_slot_id = \"mon-09\"\n\
           semester_id = \"s2-2526\"\nsubject_name = \"Clash\"\ngroup_code = \"GR9\"\nweek_numbers = [2]\n";
    let store = parse_dataset(&text, 15).unwrap();

    let weeks = WeekSet::from([2]);
    let query = ConflictQuery::new("room-p14", "mon-09", &weeks, SemesterScope::Global);
    let conflicts = find_conflicts(&store, &query).unwrap();
    let ids: Vec<&str> = conflicts.iter().map(|c| c.occupation_id.as_str()).collect();
    assert_eq!(ids, vec!["occ-drawing-gr1", "occ-history-gr1", "dup"]);
}

#[test]
fn test_writer_rejects_within_semester_and_commits_nothing() {
    let store = load_dataset(&sample_path(), 15).unwrap();
    let before = store.occupation_count();

    let err = store
        .create_occupation(booking(
            "room-p14",
            "s1-2526",
            WeekRange::Weeks(WeekSet::from([7, 8])),
            "GR5",
        ))
        .unwrap_err();
    let OccupancyError::Conflict(conflicts) = err else {
        panic!("expected a conflict");
    };
    let ids: Vec<&str> = conflicts.iter().map(|c| c.occupation_id.as_str()).collect();
    assert_eq!(ids, vec!["occ-drawing-gr1", "occ-colour-gr1"]);
    assert!(conflicts.iter().all(|c| c.semester_id == "s1-2526"));
    assert_eq!(store.occupation_count(), before);

    // Free slot in the same room goes through
    let free = NewOccupation {
        time_slot_id: "mon-11".to_string(),
        ..booking("room-p14", "s1-2526", WeekRange::FullSemester, "GR5")
    };
    let created = store.create_occupation(free).unwrap();
    assert_eq!(store.get_occupation(&created.id), Some(created));
}

#[test]
fn test_writer_books_same_weeks_in_a_later_year() {
    let store = load_dataset(&sample_path(), 15).unwrap();
    let mut next_autumn = Semester::new("s1-2627", 1, "2026-2027", 15);
    next_autumn.name = "Autumn 2026".to_string();
    store.insert_semester(next_autumn);

    // room-p14 is taken on Monday 09:00 for all of s1-2526 and s2-2526
    let created = store
        .create_occupation(booking("room-p14", "s1-2627", WeekRange::FullSemester, "GR1"))
        .unwrap();
    assert_eq!(created.semester_id, "s1-2627");

    let weeks = WeekSet::from([3]);
    let query = ConflictQuery::new("room-p14", "mon-09", &weeks, SemesterScope::Scoped("s1-2627"));
    let conflicts = find_conflicts(&store, &query).unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].occupation_id, created.id);
}

#[test]
fn test_concurrent_bookings_commit_once() {
    let store = MemoryStore::new();
    store.insert_classroom(Classroom::new("c1", "P.1.4", 30, RoomType::Lecture));
    store.insert_time_slot(TimeSlot::new(
        "mon-09",
        Weekday::Monday,
        at(9),
        at(11),
    ));
    store.insert_semester(Semester::new("s1", 1, "2025-2026", 15));
    let store = Arc::new(store);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                store
                    .create_occupation(booking(
                        "c1",
                        "s1",
                        WeekRange::Weeks(WeekSet::range(3, 6)),
                        &format!("GR{i}"),
                    ))
                    .is_ok()
            })
        })
        .collect();

    let committed = handles
        .into_iter()
        .map(|h| h.join().expect("booking thread panicked"))
        .filter(|ok| *ok)
        .count();
    assert_eq!(committed, 1);
    assert_eq!(store.occupation_count(), 1);
}
