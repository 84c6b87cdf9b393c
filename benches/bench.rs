// Criterion benchmarks for Competency Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use competency_match::config::MatchConfig;
use competency_match::core::{normalize::normalize, Matcher};
use competency_match::models::{CandidateProfile, RequirementProfile, SkillReading};
use std::collections::BTreeMap;

const SKILLS: [&str; 6] = ["python", "react", "sql", "rust", "docker", "aws"];

fn create_candidate(id: usize) -> CandidateProfile {
    let mut candidate = CandidateProfile::new(format!("c{}", id), format!("Candidate {}", id))
        .with_experience((id % 60) as u32);

    for (i, skill) in SKILLS.iter().enumerate() {
        let reading = match (id + i) % 4 {
            0 => SkillReading::Number(((id * 7 + i) % 100) as f64 / 100.0),
            1 => SkillReading::Text(format!("{}%", (id * 13 + i) % 100)),
            2 => SkillReading::Number(((id * 3 + i) % 100) as f64),
            _ => SkillReading::Absent,
        };
        candidate = candidate.with_skill(*skill, reading);
    }

    candidate
}

fn create_requirement() -> RequirementProfile {
    RequirementProfile::with_weights(SKILLS.iter().enumerate().map(|(i, skill)| (*skill, (i + 1) as f64)))
}

fn bench_normalize(c: &mut Criterion) {
    let reading = SkillReading::Text(" 85% ".to_string());
    c.bench_function("normalize_percent_string", |b| {
        b.iter(|| normalize(black_box(&reading)));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let requirement = create_requirement();
    let mut group = c.benchmark_group("ranking");

    for candidate_count in [10, 100, 1000, 10_000].iter() {
        let candidates: Vec<CandidateProfile> = (0..*candidate_count).map(create_candidate).collect();

        for (label, threshold) in [("sequential", 0), ("parallel", 1)] {
            let matcher = Matcher::new(MatchConfig {
                parallel_threshold: threshold,
                ..MatchConfig::default()
            });

            group.bench_with_input(
                BenchmarkId::new(label, candidate_count),
                candidate_count,
                |b, _| {
                    b.iter(|| matcher.rank(black_box(&candidates), black_box(&requirement)));
                },
            );
        }
    }

    group.finish();
}

fn bench_filtering(c: &mut Criterion) {
    let matcher = Matcher::with_default_config();
    let requirement = create_requirement();
    let minimums = BTreeMap::from([("python".to_string(), 0.5), ("sql".to_string(), 0.3)]);
    let candidates: Vec<CandidateProfile> = (0..1000).map(create_candidate).collect();

    c.bench_function("filter_1000_candidates", |b| {
        b.iter(|| matcher.filter(black_box(&candidates), black_box(&minimums), black_box(&requirement)));
    });
}

criterion_group!(benches, bench_normalize, bench_ranking, bench_filtering);

criterion_main!(benches);
