use std::collections::HashMap;
use std::io::{self, Write};

use anyhow::{Context, bail};
use lox_core::{AstPrinter, Diagnostics, Interpreter, RunOutcome, compile};
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};

use crate::config::ReplConfig;

type CommandFn = fn(&mut Repl, &[&str]) -> anyhow::Result<()>;

/// Scan, parse and run `source`, optionally printing each statement's tree
/// to stderr first. Diagnostics are left in `diagnostics` for the caller.
pub fn execute<W: Write>(
    source: &str,
    interpreter: &mut Interpreter<W>,
    diagnostics: &mut Diagnostics,
    print_ast: bool,
) -> io::Result<RunOutcome> {
    let Some(statements) = compile(source, diagnostics) else {
        return Ok(RunOutcome::SyntaxError);
    };

    if print_ast {
        let mut printer = AstPrinter::new();
        for statement in &statements {
            eprintln!("{}", printer.print_stmt(statement));
        }
    }

    interpreter.interpret(&statements, diagnostics)
}

/// Print every collected diagnostic to stderr and forget them.
pub fn flush_diagnostics(diagnostics: &mut Diagnostics) {
    for diagnostic in diagnostics.drain() {
        eprintln!("{}", diagnostic);
    }
}

/// Net count of `{` over `}` outside string literals.
fn brace_depth(source: &str) -> isize {
    let mut depth = 0;
    let mut in_string = false;
    for c in source.chars() {
        match c {
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => depth -= 1,
            _ => {}
        }
    }
    depth
}

pub struct Repl {
    interpreter: Interpreter,
    diagnostics: Diagnostics,
    commands: HashMap<String, CommandFn>,
    history: Vec<String>,
    input_buffer: String,
    variables: HashMap<String, String>,
    line_number: usize,
}

impl Repl {
    pub fn new(config: &ReplConfig) -> Self {
        let mut commands = HashMap::new();
        commands.insert("help".to_string(), Self::cmd_help as CommandFn);
        commands.insert("exit".to_string(), Self::cmd_exit as CommandFn);
        commands.insert("quit".to_string(), Self::cmd_exit as CommandFn);
        commands.insert("history".to_string(), Self::cmd_history as CommandFn);
        commands.insert("vars".to_string(), Self::cmd_vars as CommandFn);
        commands.insert("set".to_string(), Self::cmd_set as CommandFn);
        commands.insert("debug".to_string(), Self::cmd_debug as CommandFn);
        commands.insert("ast".to_string(), Self::cmd_ast as CommandFn);

        let mut variables = HashMap::new();
        variables.insert("debug".to_string(), "false".to_string());
        variables.insert("ast".to_string(), config.print_ast.to_string());

        Self {
            interpreter: Interpreter::new(),
            diagnostics: Diagnostics::new(),
            commands,
            history: Vec::new(),
            input_buffer: String::new(),
            variables,
            line_number: 1,
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        let span = tracing::info_span!("repl");
        let _enter = span.enter();
        let mut editor = Reedline::create();

        println!("Lox REPL v{}", env!("CARGO_PKG_VERSION"));
        println!("Type ':help' for commands, ':exit' to quit.");

        loop {
            let prompt = self.make_prompt();
            let line = match editor.read_line(&prompt) {
                Ok(Signal::Success(input)) => input,
                Ok(Signal::CtrlD) | Ok(Signal::CtrlC) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "line editor failed");
                    println!("Input error: {e}");
                    continue;
                }
            };

            let trimmed = line.trim();

            if self.input_buffer.is_empty() {
                if let Some(command) = trimmed.strip_prefix(':') {
                    if self.dispatch(command) {
                        break;
                    }
                    continue;
                }
                if trimmed.is_empty() {
                    continue;
                }
            }

            self.input_buffer.push_str(&line);
            self.input_buffer.push('\n');
            if brace_depth(&self.input_buffer) > 0 {
                continue;
            }

            let code = std::mem::take(&mut self.input_buffer);
            self.history.push(code.trim_end().to_string());
            self.line_number += 1;
            self.evaluate(&code)?;
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Run a `:command`. Returns true when the session should end.
    fn dispatch(&mut self, command: &str) -> bool {
        let mut parts = command.split_whitespace();
        let Some(name) = parts.next() else {
            return false;
        };
        let args: Vec<&str> = parts.collect();

        match self.commands.get(name).copied() {
            Some(handler) => {
                if let Err(e) = handler(self, &args) {
                    println!("Error: {e}");
                }
                name == "exit" || name == "quit"
            }
            None => {
                println!("Unknown command: {name}");
                false
            }
        }
    }

    /// Evaluate one complete input. Errors are printed and cleared so none
    /// carry into the next input.
    fn evaluate(&mut self, code: &str) -> anyhow::Result<RunOutcome> {
        if self.flag("debug") {
            eprintln!("DEBUG: Evaluating input:\n{}", code.trim_end());
        }

        let show_ast = self.flag("ast");
        let outcome = execute(code, &mut self.interpreter, &mut self.diagnostics, show_ast)
            .context("failed to write program output")?;

        if self.flag("debug") {
            eprintln!("DEBUG: {:?}", outcome);
        }
        flush_diagnostics(&mut self.diagnostics);
        Ok(outcome)
    }

    fn make_prompt(&self) -> DefaultPrompt {
        let text = if self.input_buffer.is_empty() {
            format!("lox[{}]>", self.line_number)
        } else {
            let depth = brace_depth(&self.input_buffer).max(0) as usize;
            format!("...{}", "  ".repeat(depth))
        };
        DefaultPrompt::new(DefaultPromptSegment::Basic(text), DefaultPromptSegment::Empty)
    }

    fn flag(&self, key: &str) -> bool {
        self.variables.get(key).is_some_and(|v| v == "true")
    }

    fn set_flag(&mut self, key: &str, args: &[&str]) -> anyhow::Result<()> {
        match args.first().copied() {
            None => println!("{key} is {}", if self.flag(key) { "on" } else { "off" }),
            Some("on" | "true") => {
                self.variables.insert(key.to_string(), "true".to_string());
                println!("{key} enabled");
            }
            Some("off" | "false") => {
                self.variables.insert(key.to_string(), "false".to_string());
                println!("{key} disabled");
            }
            Some(other) => bail!("expected on|off, got '{other}'"),
        }
        Ok(())
    }

    fn globals_listing(&self) -> Vec<String> {
        self.interpreter
            .environment()
            .globals()
            .into_iter()
            .map(|(name, value)| match value {
                lox_core::Value::String(s) => format!("{name} = \"{s}\""),
                other => format!("{name} = {other}"),
            })
            .collect()
    }

    fn cmd_help(&mut self, _args: &[&str]) -> anyhow::Result<()> {
        println!("Available commands:");
        println!("  :help            Show this message");
        println!("  :exit, :quit     Leave the REPL");
        println!("  :history         Show previous inputs");
        println!("  :vars            Show global variables");
        println!("  :ast on|off      Print syntax trees before running");
        println!("  :debug on|off    Toggle debug output");
        println!("  :set key=value   Set a REPL variable");
        println!("Input with unclosed braces continues on the next line.");
        Ok(())
    }

    fn cmd_exit(&mut self, _args: &[&str]) -> anyhow::Result<()> {
        Ok(())
    }

    fn cmd_history(&mut self, _args: &[&str]) -> anyhow::Result<()> {
        for (i, entry) in self.history.iter().enumerate() {
            println!("{}: {}", i + 1, entry);
        }
        Ok(())
    }

    fn cmd_vars(&mut self, _args: &[&str]) -> anyhow::Result<()> {
        let listing = self.globals_listing();
        if listing.is_empty() {
            println!("(no variables defined)");
        }
        for line in listing {
            println!("  {line}");
        }
        Ok(())
    }

    fn cmd_set(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let joined = args.join(" ");
        let Some((key, value)) = joined.split_once('=') else {
            bail!("usage: :set key=value");
        };
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() {
            bail!("usage: :set key=value");
        }

        self.variables.insert(key.to_string(), value.to_string());
        println!("Set {key} = {value}");
        Ok(())
    }

    fn cmd_debug(&mut self, args: &[&str]) -> anyhow::Result<()> {
        self.set_flag("debug", args)
    }

    fn cmd_ast(&mut self, args: &[&str]) -> anyhow::Result<()> {
        self.set_flag("ast", args)
    }
}
