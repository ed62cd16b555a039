//! Benchmarks for form validation and change handling.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sprint_forms::entities::{EntityForm, ProjectForm, SprintForm};
use sprint_forms::form::{submit_fn, Record, SubmitError};

fn filled_project() -> Record {
    ProjectForm::new()
        .initial_record()
        .with("ProjectName", "Apollo Programme")
        .with("ProjectDescription", "Landing a crew on the moon and back again")
        .with("ProjectStatus", "Active")
}

fn bench_validate_record(c: &mut Criterion) {
    let validation = ProjectForm::new().validation();
    let record = filled_project();
    c.bench_function("validate_project_record", |b| {
        b.iter(|| validation.validate(black_box(&record)))
    });
}

fn bench_handle_change(c: &mut Criterion) {
    let mut form = SprintForm::new(Some(1))
        .build(|| {}, submit_fn(|_: Record| async { Ok::<(), SubmitError>(()) }))
        .expect("sprint form builds");
    c.bench_function("handle_change_date_field", |b| {
        b.iter(|| {
            form.handle_change(black_box("SprintStartDate"), black_box("2024-11-18"))
                .map(|message| message.is_none())
        })
    });
}

criterion_group!(benches, bench_validate_record, bench_handle_change);
criterion_main!(benches);
