use pawpal_core::{Owner, Pet, Priority, ScheduleEntry, Scheduler, Task, filter_tasks, sort_by_time};

fn jordan(start: i32, end: i32) -> Owner {
    let mut owner = Owner::with_window("Jordan", start, end);
    owner.add_pet(Pet::new("Mochi", "dog", "Jordan"));
    owner.add_pet(Pet::new("Whiskers", "cat", "Jordan"));
    owner
}

fn add(owner: &mut Owner, pet: &str, task: Task) {
    owner.pet_mut(pet).unwrap().add_task(task);
}

/// The demo household: two pets, mixed priorities.
fn demo_household() -> Owner {
    let mut owner = jordan(8, 20);
    add(&mut owner, "Mochi", Task::new("Morning walk", 30, "high", "walk"));
    add(&mut owner, "Mochi", Task::new("Breakfast feeding", 15, "high", "feeding").with_frequency("daily"));
    add(&mut owner, "Mochi", Task::new("Evening walk", 45, "high", "walk"));
    add(&mut owner, "Whiskers", Task::new("Morning feeding", 10, "medium", "feeding"));
    add(&mut owner, "Whiskers", Task::new("Playtime", 20, "low", "enrichment"));
    owner
}

fn titles(plan: &[ScheduleEntry]) -> Vec<&str> {
    plan.iter().map(|e| e.task.as_str()).collect()
}

#[test]
fn demo_household_orders_by_priority_then_duration() {
    let mut owner = demo_household();
    let mut scheduler = Scheduler::new();
    let plan = scheduler.generate_schedule(&mut owner);

    assert_eq!(
        titles(&plan),
        vec!["Breakfast feeding", "Morning walk", "Evening walk", "Morning feeding", "Playtime"]
    );
    let times: Vec<_> = plan.iter().map(|e| e.scheduled_time.as_str()).collect();
    assert_eq!(times, vec!["08:00", "08:15", "08:45", "09:30", "09:40"]);
    assert_eq!(plan[3].pet, "Whiskers");
    assert!(scheduler.conflicts().is_empty());
    assert!(scheduler.unscheduled().is_empty());
}

#[test]
fn output_respects_ranking_and_capacity() {
    let mut owner = jordan(9, 11);
    add(&mut owner, "Mochi", Task::new("a", 50, "low", "x"));
    add(&mut owner, "Mochi", Task::new("b", 40, "medium", "x"));
    add(&mut owner, "Whiskers", Task::new("c", 70, "high", "x"));
    add(&mut owner, "Whiskers", Task::new("d", 20, "medium", "x"));
    add(&mut owner, "Whiskers", Task::new("e", 5, "unknown", "x"));

    let plan = Scheduler::new().generate_schedule(&mut owner);

    let used: u32 = plan.iter().map(|e| e.duration).sum();
    assert!(i64::from(used) <= owner.capacity_minutes());

    for pair in plan.windows(2) {
        let (a, b) = (Priority::from(pair[0].priority.as_str()), Priority::from(pair[1].priority.as_str()));
        assert!(a.rank() >= b.rank());
        if a.rank() == b.rank() {
            assert!(pair[0].duration <= pair[1].duration);
        }
    }
    // b (40) and a (50) no longer fit once the cursor passes 90 minutes
    assert_eq!(titles(&plan), vec!["c", "d", "e"]);
}

#[test]
fn regenerating_without_changes_is_stable() {
    let mut owner = demo_household();
    let mut scheduler = Scheduler::new();
    let first = scheduler.generate_schedule(&mut owner);
    let second = scheduler.generate_schedule(&mut owner);
    assert_eq!(first, second);
}

#[test]
fn equal_keys_keep_collection_order() {
    let mut owner = jordan(8, 20);
    add(&mut owner, "Whiskers", Task::new("cat walk", 30, "high", "walk"));
    add(&mut owner, "Mochi", Task::new("dog walk", 30, "high", "walk"));

    let plan = Scheduler::new().generate_schedule(&mut owner);
    // pet order wins: Mochi was added before Whiskers
    assert_eq!(titles(&plan), vec!["dog walk", "cat walk"]);
}

#[test]
fn value_identical_tasks_resolve_to_their_own_pets() {
    let mut owner = jordan(8, 20);
    add(&mut owner, "Mochi", Task::new("Feed", 10, "high", "feeding"));
    add(&mut owner, "Whiskers", Task::new("Feed", 10, "high", "feeding"));

    let plan = Scheduler::new().generate_schedule(&mut owner);
    let pets: Vec<_> = plan.iter().map(|e| e.pet.as_str()).collect();
    assert_eq!(pets, vec!["Mochi", "Whiskers"]);
}

#[test]
fn completing_recurring_task_then_replanning() {
    let mut owner = demo_household();
    let mut scheduler = Scheduler::new();
    scheduler.generate_schedule(&mut owner);

    let before = owner.pet("Mochi").unwrap().tasks().len();
    assert!(owner.mark_task_complete("Mochi", "Breakfast feeding"));
    let mochi = owner.pet("Mochi").unwrap();
    assert_eq!(mochi.tasks().len(), before + 1);

    let feeds: Vec<_> = mochi.tasks().iter().filter(|t| t.title == "Breakfast feeding").collect();
    assert_eq!(feeds.len(), 2);
    assert!(feeds[0].is_completed());
    assert!(!feeds[1].is_completed());

    let plan = scheduler.generate_schedule(&mut owner);
    assert_eq!(plan.iter().filter(|e| e.task == "Breakfast feeding").count(), 1);
    assert_eq!(plan.len(), 5);
}

#[test]
fn completing_plain_task_keeps_count() {
    let mut owner = demo_household();
    let before = owner.pet("Mochi").unwrap().tasks().len();
    assert!(owner.mark_task_complete("Mochi", "Morning walk"));
    assert_eq!(owner.pet("Mochi").unwrap().tasks().len(), before);
    assert!(!owner.mark_task_complete("Mochi", "Nap"));
    assert!(!owner.mark_task_complete("Rex", "Morning walk"));
}

#[test]
fn queries_over_scheduled_household() {
    let mut owner = demo_household();
    Scheduler::new().generate_schedule(&mut owner);
    owner.mark_task_complete("Whiskers", "Playtime");

    let pending_mochi = filter_tasks(&owner, owner.all_tasks(), Some(false), Some("mochi"));
    assert_eq!(pending_mochi.len(), 3);

    let sorted = sort_by_time(owner.all_tasks());
    let last = sorted.last().unwrap();
    assert_eq!(last.title, "Playtime");
    assert_eq!(last.scheduled_time(), None);
    let hours: Vec<i32> = sorted.iter().filter_map(|t| t.scheduled_time()).collect();
    assert!(hours.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn detect_conflicts_on_hand_built_entries() {
    let mut owner = jordan(8, 20);
    add(&mut owner, "Mochi", Task::new("Walk", 60, "high", "walk"));
    add(&mut owner, "Whiskers", Task::new("Feed", 30, "high", "feeding"));
    let mut scheduler = Scheduler::new();
    let mut plan = scheduler.generate_schedule(&mut owner);
    assert!(scheduler.conflicts().is_empty());

    for e in plan.iter_mut() {
        e.scheduled_time = "10:00".to_string();
        e.scheduled_hour = 10;
    }
    let warnings = scheduler.detect_conflicts(&plan).unwrap();
    assert!(!warnings.is_empty());
    assert!(warnings.iter().any(|w| w.contains("10:00") || w.to_lowercase().contains("overlap")));
    // analysis leaves cached state alone
    assert!(scheduler.conflicts().is_empty());
}
