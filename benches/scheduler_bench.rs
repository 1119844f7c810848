use criterion::{criterion_group, criterion_main, Criterion};
use timetable_scheduler::catalog::Catalog;
use timetable_scheduler::scheduler::domain::build_domains;
use timetable_scheduler::scheduler::feasibility::check_feasibility;
use timetable_scheduler::scheduler::instance_gen::generate_instances;
use timetable_scheduler::types::{
    Course, CourseId, CourseKind, Group, GroupId, Instructor, InstructorId, Role, Room, RoomId,
    RoomType, ScheduleConfig, Section, SectionId, SessionKind,
};

/// A medium-sized synthetic catalog: 6 year-groups of 4 sections each, 3
/// courses per year (Lecture + Tut + Lab), enough rooms/instructors to keep
/// every occurrence feasible. Exercises the Instance Generator and Domain
/// Builder at a scale representative of one department's weekly load.
fn synthetic_catalog() -> Catalog {
    let mut rooms = Vec::new();
    for i in 0..10 {
        rooms.push(Room {
            id: RoomId::from(format!("classroom-{i}").as_str()),
            room_type: RoomType::Classroom,
            capacity: 80,
            building: "Main".to_string(),
        });
    }
    for i in 0..4 {
        rooms.push(Room {
            id: RoomId::from(format!("lab-{i}").as_str()),
            room_type: RoomType::ComputerLab,
            capacity: 30,
            building: "Annex".to_string(),
        });
    }

    let mut instructors = Vec::new();
    for i in 0..20 {
        instructors.push(Instructor {
            id: InstructorId::from(format!("prof-{i}").as_str()),
            name: String::new(),
            role: Role::Professor,
            qualified_courses: (0..6)
                .map(|c| CourseId::from(format!("c{c}").as_str()))
                .collect(),
        });
    }
    for i in 0..20 {
        instructors.push(Instructor {
            id: InstructorId::from(format!("ta-{i}").as_str()),
            name: String::new(),
            role: Role::Ta,
            qualified_courses: (0..6)
                .map(|c| CourseId::from(format!("c{c}").as_str()))
                .collect(),
        });
    }

    let mut groups = Vec::new();
    let mut sections = Vec::new();
    for year in 1..=6u32 {
        let group_id = GroupId::from(format!("g{year}").as_str());
        groups.push(Group {
            id: group_id.clone(),
            year,
            specialization: None,
            students_count: 80,
        });
        for s in 0..4 {
            sections.push(Section {
                id: SectionId::from(format!("g{year}-s{s}").as_str()),
                group_id: group_id.clone(),
                students_count: 20,
            });
        }
    }

    let mut courses = Vec::new();
    for year in 1..=6u32 {
        for c in 0..3u32 {
            courses.push(Course {
                id: CourseId::from(format!("c{c}-y{year}").as_str()),
                name: String::new(),
                year,
                major: None,
                is_project: false,
                full_year: false,
                kinds: vec![
                    CourseKind {
                        kind: SessionKind::Lecture,
                        length_minutes: 90,
                        lab_type: None,
                        sessions_per_week: Some(2),
                        max_sections_together: 1,
                        ignore_capacity: false,
                    },
                    CourseKind {
                        kind: SessionKind::Tut,
                        length_minutes: 45,
                        lab_type: None,
                        sessions_per_week: Some(1),
                        max_sections_together: 1,
                        ignore_capacity: false,
                    },
                    CourseKind {
                        kind: SessionKind::Lab,
                        length_minutes: 90,
                        lab_type: Some(RoomType::ComputerLab),
                        sessions_per_week: Some(1),
                        max_sections_together: 2,
                        ignore_capacity: false,
                    },
                ],
            });
        }
    }

    Catalog::build(rooms, instructors, groups, sections, courses)
        .expect("synthetic catalog is internally consistent")
        .0
}

fn bench_instance_generation(c: &mut Criterion) {
    let catalog = synthetic_catalog();
    let config = ScheduleConfig::default();
    c.bench_function("instance_gen::generate_instances", |b| {
        b.iter(|| generate_instances(&catalog, &config).unwrap())
    });
}

fn bench_domain_construction(c: &mut Criterion) {
    let catalog = synthetic_catalog();
    let config = ScheduleConfig::default();
    let occurrences = generate_instances(&catalog, &config).unwrap();
    let (candidates, _errors) = check_feasibility(&catalog, &occurrences);
    c.bench_function("domain::build_domains", |b| {
        b.iter(|| build_domains(&occurrences, &candidates, &config))
    });
}

criterion_group!(benches, bench_instance_generation, bench_domain_construction);
criterion_main!(benches);
