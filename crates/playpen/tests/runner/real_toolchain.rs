//! Tests against an installed Go toolchain.
//!
//! These exercise the real CommandToolchain end to end and need `go` on PATH.

use playpen::{Config, RunError, Runner};

fn go_runner() -> Runner {
    Runner::new(Config::default())
}

#[tokio::test]
#[ignore = "requires go toolchain"]
async fn hello_world_round_trip() {
    let source = r#"
package main

import "fmt"

func main() {
	fmt.Println("Hello, Playpen!")
}
"#;

    let output = go_runner().run(source).await.expect("run failed");
    assert_eq!(output, "Hello, Playpen!");
}

#[tokio::test]
#[ignore = "requires go toolchain"]
async fn syntax_error_is_classified_as_compile_error() {
    let source = "package main\n\nfunc main() { this is not go }\n";

    match go_runner().run(source).await {
        Err(RunError::Compile(stderr)) => {
            assert!(stderr.contains("main.go"), "unexpected stderr: {stderr}");
        }
        other => panic!("expected compile error, got {other:?}"),
    }
}

#[tokio::test]
#[ignore = "requires go toolchain"]
async fn infinite_loop_hits_the_deadline() {
    let mut config = Config::default();
    config.timeout_secs = 2.0;
    let runner = Runner::new(config);

    let source = "package main\n\nfunc main() { for {} }\n";
    let result = runner.run(source).await;
    assert!(matches!(result, Err(RunError::DeadlineExceeded(_))));
}
