use super::*;

#[test]
fn null_partitioner_reports_whole_document() {
    let end = LinePosition::new(3, 5);
    let p = NullPartitioner::new(end);
    let part = p.partition_at(LinePosition::new(1, 2));
    assert_eq!(part.content_type, DEFAULT_CONTENT_TYPE);
    assert_eq!(part.start, LinePosition::new(0, 0));
    assert_eq!(part.end, end);
}

#[test]
fn null_partitioner_grows_with_document() {
    let mut p = NullPartitioner::new(LinePosition::new(0, 0));
    p.notify_change(LinePosition::new(0, 0)..LinePosition::new(5, 0));
    assert_eq!(p.partition_at(LinePosition::new(0, 0)).end, LinePosition::new(5, 0));
}
