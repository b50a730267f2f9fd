// tests/pipeline_tests.rs
use chrono::{TimeZone, Utc};
use std::io::Cursor;
use logsnap::{
    write_records, OutputFormat, PipelineConfig, SnapPipeline, TimeWindow, UntimedPolicy, Zone,
};

fn config(hours: f64) -> PipelineConfig {
    let center = Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap();
    PipelineConfig::new(TimeWindow::from_hours(center, hours).unwrap())
        .with_zone(Zone::Utc)
        .with_year(2023)
}

fn run(config: PipelineConfig, sources: &[(&str, &str)]) -> String {
    let mut pipeline = SnapPipeline::new(config);
    for (id, content) in sources {
        pipeline.process_source(Cursor::new(*content), id).unwrap();
    }
    let (records, _stats) = pipeline.finish();
    let mut output = Vec::new();
    write_records(&mut output, &records, OutputFormat::Line).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_one_hour_window_keeps_middle_line() {
    let syslog = "Jun  1 10:30:00 host cron[1]: before\n\
                  Jun  1 12:30:00 host cron[2]: inside\n\
                  Jun  1 13:30:00 host cron[3]: after\n";

    assert_eq!(
        run(config(1.0), &[("syslog", syslog)]),
        "syslog: Jun  1 12:30:00 host cron[2]: inside\n"
    );
}

#[test]
fn test_one_hour_window_boundaries_are_inclusive() {
    let syslog = "Jun  1 10:59:59 host a: below\n\
                  Jun  1 11:00:00 host a: at lower bound\n\
                  Jun  1 12:30:00 host a: inside\n\
                  Jun  1 13:00:00 host a: at upper bound\n\
                  Jun  1 13:30:00 host a: above\n";

    let output = run(config(1.0), &[("syslog", syslog)]);
    assert_eq!(
        output,
        "syslog: Jun  1 11:00:00 host a: at lower bound\n\
         syslog: Jun  1 12:30:00 host a: inside\n\
         syslog: Jun  1 13:00:00 host a: at upper bound\n"
    );
}

#[test]
fn test_leading_untimed_lines_are_never_included() {
    let content = "-- journal begins --\n\
                   continuation without time\n\
                   Jun  1 12:00:00 host a: first real line\n";

    // Even a window covering all of time wouldn't include them
    let output = run(config(100_000.0), &[("weird.log", content)]);
    assert_eq!(output, "weird.log: Jun  1 12:00:00 host a: first real line\n");
}

#[test]
fn test_untimed_lines_inherit_previous_time() {
    let content = "Jun  1 09:00:00 host a: outside\n\
                   \tstack frame outside\n\
                   Jun  1 12:00:00 host a: inside\n\
                   \tstack frame inside\n";

    let output = run(config(1.0), &[("app.log", content)]);
    assert_eq!(
        output,
        "app.log: Jun  1 12:00:00 host a: inside\n\
         app.log: \tstack frame inside\n"
    );

    let output = run(
        config(1.0).with_untimed(UntimedPolicy::Drop),
        &[("app.log", content)],
    );
    assert_eq!(output, "app.log: Jun  1 12:00:00 host a: inside\n");
}

#[test]
fn test_sources_merge_chronologically() {
    let syslog = "Jun  1 11:30:00 host kernel: one\n\
                  Jun  1 12:10:00 host kernel: three\n";
    let dpkg = "2023-06-01 11:45:00 status installed two\n\
                2023-06-01 12:20:00 status installed four\n";

    let output = run(config(1.0), &[("syslog", syslog), ("dpkg.log", dpkg)]);
    assert_eq!(
        output,
        "syslog: Jun  1 11:30:00 host kernel: one\n\
         dpkg.log: 2023-06-01 11:45:00 status installed two\n\
         syslog: Jun  1 12:10:00 host kernel: three\n\
         dpkg.log: 2023-06-01 12:20:00 status installed four\n"
    );
}

#[test]
fn test_equal_times_keep_source_input_order() {
    let zeta = "Jun  1 12:00:00 host z: from zeta\n";
    let alpha = "2023-06-01 12:00:00 from alpha\n";

    let output = run(config(1.0), &[("zeta.log", zeta), ("alpha.log", alpha)]);
    assert_eq!(
        output,
        "zeta.log: Jun  1 12:00:00 host z: from zeta\n\
         alpha.log: 2023-06-01 12:00:00 from alpha\n"
    );

    let output = run(config(1.0), &[("alpha.log", alpha), ("zeta.log", zeta)]);
    assert_eq!(
        output,
        "alpha.log: 2023-06-01 12:00:00 from alpha\n\
         zeta.log: Jun  1 12:00:00 host z: from zeta\n"
    );
}

#[test]
fn test_out_of_order_lines_within_a_source_are_sorted() {
    let content = "Jun  1 12:40:00 host a: later\n\
                   Jun  1 12:05:00 host a: earlier\n";

    let output = run(config(1.0), &[("a.log", content)]);
    assert_eq!(
        output,
        "a.log: Jun  1 12:05:00 host a: earlier\n\
         a.log: Jun  1 12:40:00 host a: later\n"
    );
}

#[test]
fn test_tagged_iso_lines() {
    let content = "installer 2023-06-01 12:15:00 unpacking\n\
                   installer 2023-06-02 12:15:00 too late\n";

    let output = run(config(1.0), &[("installer.log", content)]);
    assert_eq!(output, "installer.log: installer 2023-06-01 12:15:00 unpacking\n");
}

#[test]
fn test_output_is_idempotent() {
    let syslog = "Jun  1 12:00:00 host a: x\nnoise\nJun  1 11:59:00 host a: y\n";
    let dpkg = "2023-06-01 12:00:00 z\n";

    let first = run(config(1.0), &[("syslog", syslog), ("dpkg.log", dpkg)]);
    let second = run(config(1.0), &[("syslog", syslog), ("dpkg.log", dpkg)]);
    assert_eq!(first, second);
    assert_eq!(first.lines().count(), 4);
}

#[test]
fn test_stats_are_accumulated() {
    let mut pipeline = SnapPipeline::new(config(1.0));
    pipeline
        .process_source(Cursor::new("Jun 1 12:00:00 h a\nuntimed\n"), "a")
        .unwrap();
    pipeline
        .process_source(Cursor::new("Jun 1 20:00:00 h b\n"), "b")
        .unwrap();

    let stats = pipeline.stats().clone();
    assert_eq!(stats.sources_scanned, 2);
    assert_eq!(stats.lines_read, 3);
    assert_eq!(stats.lines_recognized, 2);
    assert_eq!(stats.lines_inherited, 1);
    assert_eq!(stats.records_included, 2);
}
