use super::*;

use std::cell::RefCell;
use std::convert::Infallible;
use std::io;

use rstest::{fixture, rstest};
use zamm_api::MethodDescriptor;
use zamm_api::handlers::GreetMethod;
use zamm_api::models::{ChatMessage, ChatResponse, GreetRequest, GreetResponse, TokenMetadata};

#[derive(Default)]
struct RecordingLoader {
    config: Config,
    seen: RefCell<Vec<OsString>>,
}

impl ConfigLoader for RecordingLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        self.seen.borrow_mut().extend_from_slice(args);
        Ok(self.config.clone())
    }
}

struct Outcome {
    exit: ExitCode,
    stdout: String,
    stderr: String,
}

fn greet_only(_: &Config) -> Result<MethodRegistry, RegistryError> {
    Ok(MethodRegistry::builder().method(GreetMethod)?.build())
}

fn run_args<R>(args: &[&str], loader: &RecordingLoader, build_registry: R) -> Outcome
where
    R: FnOnce(&Config) -> Result<MethodRegistry, RegistryError>,
{
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let mut io = IoStreams::new(&mut stdout, &mut stderr);
    let exit = run_with_loader(
        args.iter().map(OsString::from),
        &mut io,
        loader,
        build_registry,
    );
    Outcome {
        exit,
        stdout: String::from_utf8(stdout).expect("stdout utf8"),
        stderr: String::from_utf8(stderr).expect("stderr utf8"),
    }
}

#[fixture]
fn loader() -> RecordingLoader {
    RecordingLoader::default()
}

#[rstest]
fn greet_prints_one_line(loader: RecordingLoader) {
    let outcome = run_args(&["zamm", "greet", r#"{"name":"World"}"#], &loader, greet_only);

    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert_eq!(
        outcome.stdout,
        "{\"greeting\":\"Hello, World! You have been greeted from Rust\"}\n"
    );
    assert!(outcome.stderr.is_empty());
}

#[rstest]
#[case::unknown_method(&["zamm", "shout", "{}"], "error: unknown method 'shout'")]
#[case::malformed(&["zamm", "greet", "{not json"], "error: malformed JSON arguments")]
#[case::missing_field(&["zamm", "greet", "{}"], "error: invalid arguments for 'greet'")]
fn caller_mistakes_exit_with_usage_status(
    loader: RecordingLoader,
    #[case] args: &[&str],
    #[case] diagnostic: &str,
) {
    let outcome = run_args(args, &loader, greet_only);

    assert_eq!(outcome.exit, ExitCode::from(2));
    assert!(outcome.stdout.is_empty());
    assert!(
        outcome.stderr.starts_with(diagnostic),
        "stderr was {:?}",
        outcome.stderr
    );
}

#[rstest]
fn handler_failure_exits_with_one(loader: RecordingLoader) {
    let outcome = run_args(&["zamm", "fail", r#"{"name":"x"}"#], &loader, |_| {
        Ok(MethodRegistry::builder()
            .register(MethodDescriptor::from_fn(
                "fail",
                |_: GreetRequest| -> Result<GreetResponse, io::Error> {
                    Err(io::Error::other("upstream unavailable"))
                },
            ))?
            .build())
    });

    assert_eq!(outcome.exit, ExitCode::from(1));
    assert!(outcome.stdout.is_empty());
    assert!(outcome.stderr.contains("upstream unavailable"));
}

#[rstest]
fn unencodable_response_exits_with_seventy(loader: RecordingLoader) {
    let outcome = run_args(&["zamm", "infinite", r#"{"name":"x"}"#], &loader, |_| {
        Ok(MethodRegistry::builder()
            .register(MethodDescriptor::from_fn("infinite", |_: GreetRequest| {
                Ok::<_, Infallible>(ChatResponse {
                    llm: None,
                    response: ChatMessage::new("", "AI"),
                    tokens: TokenMetadata {
                        completion: 0,
                        prompt: 0,
                        total: 0,
                        cost: f64::INFINITY,
                    },
                })
            }))?
            .build())
    });

    assert_eq!(outcome.exit, ExitCode::from(70));
    assert!(outcome.stdout.is_empty());
    assert!(outcome.stderr.contains("tokens.cost"));
}

#[rstest]
#[case::no_arguments(&["zamm"])]
#[case::method_only(&["zamm", "greet"])]
#[case::extra_positional(&["zamm", "greet", "{}", "{}"])]
fn wrong_arity_is_a_usage_error(loader: RecordingLoader, #[case] args: &[&str]) {
    let outcome = run_args(args, &loader, greet_only);

    assert_eq!(outcome.exit, ExitCode::from(2));
    assert!(outcome.stdout.is_empty());
    assert!(outcome.stderr.contains("Usage:"));
    assert!(loader.seen.borrow().is_empty(), "config loaded on usage error");
}

#[rstest]
fn help_goes_to_stdout(loader: RecordingLoader) {
    let outcome = run_args(&["zamm", "--help"], &loader, greet_only);

    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert!(outcome.stdout.contains("<ARGS_JSON>"));
}

#[rstest]
fn config_flags_reach_the_loader_only(loader: RecordingLoader) {
    let outcome = run_args(
        &[
            "zamm",
            "--log-format=json",
            "--request-timeout-secs",
            "5",
            "greet",
            r#"{"name":"Ada"}"#,
        ],
        &loader,
        greet_only,
    );

    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    let seen: Vec<OsString> = ["zamm", "--log-format=json", "--request-timeout-secs", "5"]
        .into_iter()
        .map(OsString::from)
        .collect();
    assert_eq!(*loader.seen.borrow(), seen);
}

#[rstest]
fn registry_failure_is_reported(loader: RecordingLoader) {
    let outcome = run_args(&["zamm", "greet", "{}"], &loader, |_| {
        MethodRegistry::builder()
            .method(GreetMethod)?
            .method(GreetMethod)
            .map(zamm_api::RegistryBuilder::build)
    });

    assert_eq!(outcome.exit, ExitCode::from(1));
    assert!(outcome.stderr.contains("registered more than once"));
}
