//! Integration tests for the hourly occupancy reporter

use room_occupancy::core::calendar::TimeOfDay;
use room_occupancy::core::models::{
    Classroom, Occupation, RoomType, SectionSummary, Semester, TimeSlot, WeekRange, Weekday,
    NOT_ASSIGNED,
};
use room_occupancy::core::occupancy::{
    get_all_classrooms_occupancy, get_classroom_occupancy, hourly_grid,
};
use room_occupancy::core::repository::{load_dataset, MemoryStore};
use room_occupancy::core::WeekSet;
use std::path::Path;

fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

fn store() -> MemoryStore {
    let store = MemoryStore::new();
    for (id, code) in [("C2", "B.2"), ("C3", "C.3"), ("C4", "A.4")] {
        store.insert_classroom(Classroom::new(id, code, 25, RoomType::Lecture));
    }
    store.insert_time_slot(TimeSlot::new("tue-09", Weekday::Tuesday, t("09:00"), t("11:00")));
    store.insert_time_slot(TimeSlot::new("mon-0930", Weekday::Monday, t("09:00"), t("10:30")));
    store.insert_time_slot(TimeSlot::new("fri-14", Weekday::Friday, t("14:00"), t("21:00")));
    store.insert_semester(Semester::new("S1", 1, "2025-2026", 15));
    store.insert_semester(Semester::new("S2", 2, "2025-2026", 15));
    store.insert_semester(Semester::new("S1-old", 1, "2024-2025", 15));
    store
}

fn occupation(id: &str, room: &str, slot: &str, semester: &str, weeks: WeekRange) -> Occupation {
    Occupation {
        id: id.to_string(),
        classroom_ids: vec![room.to_string()],
        time_slot_id: slot.to_string(),
        semester_id: semester.to_string(),
        weeks,
        section: SectionSummary::new("History of Art", "GR4", None),
    }
}

#[test]
fn test_week_blind_tuesday_occupancy() {
    let store = store();
    store.seed_occupation(occupation(
        "o1",
        "C2",
        "tue-09",
        "S1",
        WeekRange::Weeks(WeekSet::from([1, 2, 3])),
    ));

    let result = get_classroom_occupancy(&store, "C2", Some("S1")).unwrap();
    assert_eq!(result.len(), 1);
    let occ = &result[0].classroom_occupancy;
    let occupied: Vec<&str> = occ.occupied_slots().map(|s| s.id.as_str()).collect();
    assert_eq!(occupied, vec!["2-09:00-10:00", "2-10:00-11:00"]);
    assert_eq!(occ.slots.len(), 65);

    let assignment = occ.slots[14].assignment.as_ref().unwrap();
    assert_eq!(assignment.subject_name, "History of Art");
    assert_eq!(assignment.teacher_name, NOT_ASSIGNED);
    assert_eq!(assignment.group_code, "GR4");

    // 2/30 morning, 0/35 afternoon, 2/65 total
    assert_eq!(occ.morning_percentage, 7);
    assert_eq!(occ.afternoon_percentage, 0);
    assert_eq!(occ.total_percentage, 3);
}

#[test]
fn test_empty_classroom_is_all_free() {
    let store = store();
    let result = get_classroom_occupancy(&store, "C3", None).unwrap();
    assert_eq!(result.len(), 2);
    for semester in &result {
        let occ = &semester.classroom_occupancy;
        assert_eq!(occ.morning_percentage, 0);
        assert_eq!(occ.afternoon_percentage, 0);
        assert_eq!(occ.total_percentage, 0);
        assert_eq!(occ.slots.len(), 65);
        assert!(occ.slots.iter().all(|s| !s.is_occupied && s.assignment.is_none()));
    }
}

#[test]
fn test_unknown_classroom_is_all_free() {
    let result = get_classroom_occupancy(&store(), "missing", Some("S1")).unwrap();
    assert_eq!(result[0].classroom_occupancy.total_percentage, 0);
    assert_eq!(result[0].classroom_occupancy.slots.len(), 65);
}

#[test]
fn test_partial_overlap_does_not_occupy() {
    let store = store();
    store.seed_occupation(occupation("o1", "C2", "mon-0930", "S1", WeekRange::FullSemester));

    let result = get_classroom_occupancy(&store, "C2", Some("S1")).unwrap();
    let occ = &result[0].classroom_occupancy;
    let nine = occ.slots.iter().find(|s| s.id == "1-09:00-10:00").unwrap();
    let ten = occ.slots.iter().find(|s| s.id == "1-10:00-11:00").unwrap();
    assert!(nine.is_occupied);
    assert!(!ten.is_occupied);
}

#[test]
fn test_fixed_semesters_match_by_number() {
    let store = store();
    store.seed_occupation(occupation("o1", "C2", "tue-09", "S1-old", WeekRange::FullSemester));
    store.seed_occupation(occupation("o2", "C2", "fri-14", "S2", WeekRange::FullSemester));

    let result = get_classroom_occupancy(&store, "C2", None).unwrap();
    assert_eq!(result[0].semester_id, "1");
    assert_eq!(result[0].semester_name, "Semester 1");
    assert_eq!(result[0].classroom_occupancy.occupied_slots().count(), 2);
    assert_eq!(result[1].semester_name, "Semester 2");
    // Friday 14:00-21:00 is 7 of the 35 afternoon buckets
    assert_eq!(result[1].classroom_occupancy.afternoon_percentage, 20);
    assert_eq!(result[1].classroom_occupancy.morning_percentage, 0);
    assert_eq!(result[1].classroom_occupancy.total_percentage, 11);
}

#[test]
fn test_requested_semester_uses_stored_name() {
    let mut named = Semester::new("S9", 2, "2026-2027", 15);
    named.name = "Spring 2027".to_string();
    let store = store();
    store.insert_semester(named);
    let result = get_classroom_occupancy(&store, "C2", Some("S9")).unwrap();
    assert_eq!(result[0].semester_id, "S9");
    assert_eq!(result[0].semester_name, "Spring 2027");
}

#[test]
fn test_repeated_reports_are_identical() {
    let store = store();
    store.seed_occupation(occupation("o1", "C2", "tue-09", "S1", WeekRange::FullSemester));
    let first = get_classroom_occupancy(&store, "C2", None).unwrap();
    let second = get_classroom_occupancy(&store, "C2", None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_grid_is_independent_of_time_slots() {
    assert_eq!(hourly_grid().len(), 65);
    let empty = MemoryStore::new();
    let result = get_classroom_occupancy(&empty, "C1", None).unwrap();
    assert!(result.iter().all(|s| s.classroom_occupancy.slots.len() == 65));
}

#[test]
fn test_all_classrooms_sorted_by_code() {
    let all = get_all_classrooms_occupancy(&store(), Some("S1")).unwrap();
    let codes: Vec<&str> = all.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["A.4", "B.2", "C.3"]);
    assert!(all.iter().all(|c| c.semesters.len() == 1));
}

#[test]
fn test_sample_dataset_occupancy() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("samples/campus.toml");
    let store = load_dataset(&path, 15).unwrap();

    let result = get_classroom_occupancy(&store, "room-p14", None).unwrap();
    let autumn = &result[0].classroom_occupancy;
    // Monday 09-11 and Tuesday 15-17
    assert_eq!(autumn.occupied_slots().count(), 4);
    let monday = autumn.slots.iter().find(|s| s.id == "1-09:00-10:00").unwrap();
    assert_eq!(
        monday.assignment.as_ref().map(|a| a.subject_name.as_str()),
        Some("Drawing I")
    );

    let lab = get_classroom_occupancy(&store, "room-p05", Some("s2-2526")).unwrap();
    // Wednesday 09:30-11:00 only contains the 10:00 bucket
    let occupied: Vec<&str> = lab[0]
        .classroom_occupancy
        .occupied_slots()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(occupied, vec!["3-10:00-11:00"]);
}
