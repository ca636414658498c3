use std::io::{self, Cursor, Write};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use gesturectl::actions::EventSink;
use gesturectl::config::Profile;
use gesturectl::pipeline::run_pipeline;
use gesturectl::{Frame, Gesture, Hand, Landmark};

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Wrist at (x, y); `open` extends every finger, otherwise a fist.
fn hand(x: f32, y: f32, open: bool) -> Hand {
    let mut pts = vec![Landmark::new(x, y); 21];
    pts[9] = Landmark::new(x, y - 0.05);
    pts[3] = Landmark::new(x, y - 0.02);
    pts[4] = Landmark::new(if open { x - 0.03 } else { x + 0.03 }, y - 0.02);
    for tip in [8, 12, 16, 20] {
        pts[tip - 2] = Landmark::new(x, y - 0.10);
        pts[tip] = Landmark::new(x, if open { y - 0.15 } else { y - 0.05 });
    }
    Hand::new(pts)
}

fn line(f: &Frame) -> String {
    serde_json::to_string(f).unwrap()
}

fn replay(lines: &[String]) -> (gesturectl::pipeline::RunSummary, Vec<serde_json::Value>) {
    let profile = Profile::from_toml_str(
        r#"
        [meta]
        name = "replay"

        [bindings]
        clap = "emit:circle"
        wave = "emit:square"
        "#,
    )
    .unwrap();

    let buf = SharedBuf::default();
    let mut sink = EventSink::new(Box::new(buf.clone()), false);
    let input = lines.join("\n");
    let summary = run_pipeline(
        &profile,
        Box::new(Cursor::new(input)),
        &mut sink,
        Arc::new(AtomicBool::new(false)),
    )
    .unwrap();

    let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    let events = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    (summary, events)
}

#[test]
fn clap_then_wave_session() {
    let mut lines = Vec::new();
    // hands approach each other on a 1000px frame
    for (i, d) in [250.0f32, 230.0, 210.0, 180.0, 150.0, 130.0, 115.0, 90.0]
        .into_iter()
        .enumerate()
    {
        let half = d / 2000.0;
        let f = Frame::new(
            i as f64 * 0.033,
            1000,
            1000,
            vec![hand(0.5 - half, 0.6, false), hand(0.5 + half, 0.6, false)],
        );
        lines.push(line(&f));
    }
    // one open hand sweeping right
    lines.push(line(&Frame::new(1.0, 640, 480, vec![hand(0.30, 0.5, true)])));
    lines.push(line(&Frame::new(1.4, 640, 480, vec![hand(0.50, 0.5, true)])));

    let (summary, events) = replay(&lines);

    assert_eq!(summary.frames, 10);
    assert_eq!(summary.count(Gesture::Clap), 1);
    assert_eq!(summary.count(Gesture::Wave), 1);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["gesture"], "clap");
    assert_eq!(events[0]["token"], "circle");
    assert_eq!(events[1]["gesture"], "wave");
    assert_eq!(events[1]["token"], "square");
    assert_eq!(events[1]["t"], 1.4);
}

#[test]
fn unbound_gesture_is_reported_without_token() {
    let thumbs = {
        let mut h = hand(0.5, 0.5, false);
        h.landmarks[4] = Landmark::new(0.47, 0.48);
        h
    };
    let lines = vec![
        line(&Frame::new(0.0, 640, 480, vec![thumbs.clone()])),
        line(&Frame::new(0.2, 640, 480, vec![thumbs])),
    ];

    let (summary, events) = replay(&lines);

    assert_eq!(summary.count(Gesture::ThumbsUp), 1);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["gesture"], "thumbs_up");
    assert!(events[0].get("token").is_none());
}

#[test]
fn one_hand_frames_break_a_clap() {
    let mut lines = Vec::new();
    let mut t = 0.0;
    for d in [250.0f32, 230.0, 210.0, 180.0, 150.0, 130.0] {
        let half = d / 2000.0;
        lines.push(line(&Frame::new(
            t,
            1000,
            1000,
            vec![hand(0.5 - half, 0.6, false), hand(0.5 + half, 0.6, false)],
        )));
        t += 0.033;
    }
    for _ in 0..5 {
        lines.push(line(&Frame::new(t, 1000, 1000, vec![hand(0.5, 0.6, false)])));
        t += 0.033;
    }
    lines.push(line(&Frame::new(
        t,
        1000,
        1000,
        vec![hand(0.455, 0.6, false), hand(0.545, 0.6, false)],
    )));

    let (summary, events) = replay(&lines);

    assert_eq!(summary.frames, 12);
    assert_eq!(summary.count(Gesture::Clap), 0);
    assert!(events.is_empty());
}
