use corpusprep_core::{
    process, CorpusProcessor, Phase, PreprocessConfig, ProcessError, ProcessReport,
};
use pretty_assertions::assert_eq;

#[derive(Debug, PartialEq, Eq)]
enum TestError {
    Source(&'static str),
    Sink,
    Process(ProcessError),
}

impl From<ProcessError> for TestError {
    fn from(err: ProcessError) -> Self {
        TestError::Process(err)
    }
}

fn init_logging() {
    corpusprep_logging::initialize_for_tests();
}

fn run(lines: &[&str], config: PreprocessConfig) -> (Vec<String>, ProcessReport) {
    let mut output = Vec::new();
    let report = process(
        lines.iter().map(|l| Ok::<_, TestError>(l.to_string())),
        config,
        |line| {
            output.push(line.to_owned());
            Ok(())
        },
    )
    .unwrap();
    (output, report)
}

#[test]
fn output_lines_match_input_lines_one_to_one() {
    init_logging();
    let (output, report) = run(
        &["Hello, world!", "", "Room 101."],
        PreprocessConfig::new(false),
    );
    assert_eq!(output, vec!["Hello , world !", "", "Room 000 ."]);
    assert_eq!(report.line_count, 3);
    assert_eq!(report.total_tokens, 7);
    assert_eq!(report.vocabulary, None);
}

#[test]
fn total_tokens_is_sum_of_output_token_counts() {
    init_logging();
    let (output, report) = run(
        &["a b c", "  ", "d, e.", "f"],
        PreprocessConfig::new(false).with_vocabulary(10),
    );
    let summed: usize = output
        .iter()
        .map(|line| line.split_whitespace().count())
        .sum();
    assert_eq!(report.total_tokens, summed as u64);
}

#[test]
fn vocabulary_is_ranked_and_capped() {
    init_logging();
    let (_, report) = run(
        &["The cat. The dog.", "the end"],
        PreprocessConfig::new(true).with_vocabulary(3),
    );
    assert_eq!(
        report.vocabulary,
        Some(vec!["the".to_string(), ".".to_string(), "cat".to_string()])
    );
    assert_eq!(report.distinct_tokens, 5);
}

#[test]
fn zero_cap_still_builds_an_empty_vocabulary() {
    init_logging();
    let (_, report) = run(&["a b"], PreprocessConfig::new(false).with_vocabulary(0));
    assert_eq!(report.vocabulary, Some(Vec::new()));
}

#[test]
fn identical_runs_are_identical() {
    init_logging();
    let lines = ["x y z", "z y", "y"];
    let config = PreprocessConfig::new(false).with_vocabulary(2);
    assert_eq!(run(&lines, config), run(&lines, config));
}

#[test]
fn source_error_aborts_before_sink_sees_later_lines() {
    init_logging();
    let lines = vec![
        Ok("first".to_string()),
        Err(TestError::Source("unreadable")),
        Ok("never".to_string()),
    ];
    let mut seen = Vec::new();
    let result = process(lines, PreprocessConfig::new(false), |line| {
        seen.push(line.to_owned());
        Ok(())
    });
    assert_eq!(result, Err(TestError::Source("unreadable")));
    assert_eq!(seen, vec!["first"]);
}

#[test]
fn sink_error_aborts_the_pass() {
    init_logging();
    let lines = ["one", "two", "three"].map(|l| Ok(l.to_string()));
    let mut calls = 0;
    let result = process(lines, PreprocessConfig::new(false), |_| {
        calls += 1;
        if calls == 2 {
            Err(TestError::Sink)
        } else {
            Ok(())
        }
    });
    assert_eq!(result, Err(TestError::Sink));
    assert_eq!(calls, 2);
}

#[test]
fn processor_moves_through_phases_once() {
    init_logging();
    let mut processor = CorpusProcessor::new(PreprocessConfig::new(false).with_vocabulary(5));
    assert_eq!(processor.phase(), Phase::Streaming);
    assert_eq!(processor.feed("a a b").unwrap(), "a a b");
    assert_eq!(processor.total_tokens(), 3);

    let report = processor.finish().unwrap();
    assert_eq!(processor.phase(), Phase::Done);
    assert_eq!(report.vocabulary, Some(vec!["a".to_string(), "b".to_string()]));

    assert_eq!(processor.feed("late"), Err(ProcessError::AlreadyFinished));
    assert_eq!(processor.finish(), Err(ProcessError::AlreadyFinished));
}

#[test]
fn finalizing_phase_rejects_lines_until_finished() {
    init_logging();
    let mut processor = CorpusProcessor::new(PreprocessConfig::new(false).with_vocabulary(1));
    processor.feed("b a b").unwrap();

    processor.end_stream().unwrap();
    assert_eq!(processor.phase(), Phase::Finalizing);
    assert_eq!(processor.feed("more"), Err(ProcessError::AlreadyFinished));
    assert_eq!(processor.end_stream(), Err(ProcessError::AlreadyFinished));

    let report = processor.finish().unwrap();
    assert_eq!(processor.phase(), Phase::Done);
    assert_eq!(report.line_count, 1);
    assert_eq!(report.vocabulary, Some(vec!["b".to_string()]));
}
