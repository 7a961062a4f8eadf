use avlplaylist::parse_lines;
use avlutils::IdAllocator;

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_extinf_units() {
    let ids = IdAllocator::new();
    let parsed = parse_lines(
        &lines(&[
            "#EXTM3U",
            "#EXTINF:185,First track",
            "/music/a.mp3",
            "#EXTINF:42,Second track",
            "http://radio.example/live",
        ]),
        &ids,
    );
    assert_eq!(parsed.resources.len(), 2);
    assert_eq!(parsed.resources[0].description(), "First track");
    assert_eq!(parsed.resources[0].resource_name(), Some("/music/a.mp3"));
    assert_eq!(parsed.resources[0].length_ms(), 185_000);
    assert_eq!(parsed.resources[1].length_ms(), 42_000);
}

#[test]
fn test_non_positive_durations_kept_as_given() {
    let ids = IdAllocator::new();
    let parsed = parse_lines(
        &lines(&[
            "#EXTM3U",
            "#EXTINF:-1,A stream",
            "http://radio.example/live",
            "#EXTINF:0,Zero",
            "/music/z.mp3",
            "#EXTINF:-7,Negative",
            "/music/n.mp3",
        ]),
        &ids,
    );
    // Unlike the PLS parser, M3U does not normalize non-positive durations.
    assert_eq!(parsed.resources[0].length_ms(), -1);
    assert_eq!(parsed.resources[1].length_ms(), 0);
    assert_eq!(parsed.resources[2].length_ms(), -7);
}

#[test]
fn test_listdesc_last_wins() {
    let ids = IdAllocator::new();
    let parsed = parse_lines(
        &lines(&[
            "#EXTM3U",
            "# ListDesc: Old name",
            "#EXTINF:10,A",
            "/a.mp3",
            "#ListDesc: New name",
            "#EXTINF:10,B",
            "/b.mp3",
        ]),
        &ids,
    );
    assert_eq!(parsed.resources.len(), 2);
    assert_eq!(parsed.description.as_deref(), Some("New name"));
}

#[test]
fn test_comment_consumed_alone() {
    let ids = IdAllocator::new();
    let parsed = parse_lines(
        &lines(&["#EXTM3U", "# a remark", "#EXTINF:5,A", "/a.mp3"]),
        &ids,
    );
    // The comment must not eat the #EXTINF line as a resource name.
    assert_eq!(parsed.resources.len(), 1);
    assert_eq!(parsed.resources[0].resource_name(), Some("/a.mp3"));
}

#[test]
fn test_bare_unit_takes_next_line_as_resource() {
    let ids = IdAllocator::new();
    let parsed = parse_lines(&lines(&["#EXTM3U", "not-a-directive", "/a.mp3"]), &ids);
    assert_eq!(parsed.resources.len(), 1);
    assert_eq!(parsed.resources[0].resource_name(), Some("/a.mp3"));
    assert_eq!(parsed.resources[0].length_ms(), -1);
}

#[test]
fn test_terminates_below_two_lines() {
    let ids = IdAllocator::new();
    // The trailing unpaired directive is never consumed.
    let parsed = parse_lines(
        &lines(&["#EXTM3U", "#EXTINF:5,A", "/a.mp3", "#EXTINF:9,Dangling"]),
        &ids,
    );
    assert_eq!(parsed.resources.len(), 1);

    let parsed = parse_lines(&lines(&["#EXTM3U", "/only-one-line.mp3"]), &ids);
    assert_eq!(parsed.resources.len(), 0);
}

#[test]
fn test_empty_title_falls_back_to_name() {
    let ids = IdAllocator::new();
    let parsed = parse_lines(&lines(&["#EXTM3U", "#EXTINF:5,", "/a.mp3"]), &ids);
    assert_eq!(parsed.resources[0].description(), "/a.mp3");
}
