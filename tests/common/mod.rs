//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

/// A few minutes of an episode, with the usual closed-caption clutter.
pub const EPISODE: &str = "\u{feff}1
00:00:01,000 --> 00:00:03,200
{\\an8}<font color=\"#ffff00\">DEADWOOD</font>

2
00:00:04,000 --> 00:00:06,500
Pay the man.

3
00:00:07,000 --> 00:00:09,000
- Hey Dan!
- Hello Ellsworth...

4
00:00:09,500 --> 00:00:11,000
(door slams)

5
00:00:11,250 --> 00:00:14,008
Dan: Hey, hey you!
Get over here.

6
00:00:15,000 --> 00:00:17,000
♪ Kick off your high heels ♪

7
00:00:18,000 --> 00:00:17,500
(man yells)
Let me see them.

8
00:01:02,003 --> 00:01:04,000
MAN:
";

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}
