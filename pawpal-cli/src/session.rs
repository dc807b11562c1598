//! Interactive planning session.
//!
//! All state lives in `AppState`: created when the session starts, mutated only
//! through `handle`, dropped when the session ends.

use anyhow::{bail, Context, Result};
use pawpal_core::{Owner, Pet, Scheduler, filter_tasks, sort_by_time};
use pawpal_ingest::parse_task_line;
use std::io::{self, BufRead, Write};
use tracing::debug;

use crate::render::{render_plan_report, render_task_list};

const HELP: &str = "\
Commands:
  owner <name>                      rename the owner
  window <start> <end>              set availability hours
  pets                              list pets
  pet add <name> [species]          add a pet
  pet remove <name>                 remove a pet
  task add <pet>: <title> | <minutes> | <priority> [| <type> [| <frequency>]]
  task done <pet>: <title>          complete a task (recurring tasks regenerate)
  task undo <pet>: <title>          reopen a task
  task remove <pet>: <title>        delete a task
  tasks [pending|done] [pet]        list tasks in time order
  plan                              generate today's schedule
  explain                           explain the last schedule
  conflicts                         show warnings for the last schedule
  help                              this text
  quit                              leave the session
";

#[derive(Debug)]
pub struct AppState {
    pub owner: Owner,
    pub scheduler: Scheduler,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Reply(String),
    Quit,
}

fn reply(s: impl Into<String>) -> Result<Outcome> {
    Ok(Outcome::Reply(s.into()))
}

/// Split "<pet>: <rest>".
fn pet_and_rest(args: &str) -> Result<(&str, &str)> {
    let Some((pet, rest)) = args.split_once(':') else {
        bail!("expected '<pet>: ...'");
    };
    Ok((pet.trim(), rest.trim()))
}

impl AppState {
    pub fn new(owner: Owner) -> Self {
        Self {
            owner,
            scheduler: Scheduler::new(),
        }
    }

    fn pet_mut(&mut self, name: &str) -> Result<&mut Pet> {
        self.owner
            .pet_mut(name)
            .with_context(|| format!("no pet named '{name}'"))
    }

    /// Run one command line.
    pub fn handle(&mut self, line: &str) -> Result<Outcome> {
        let line = line.trim();
        let (cmd, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let args = args.trim();
        debug!(cmd, args, "session command");

        match cmd {
            "" => reply(""),
            "help" => reply(HELP),
            "quit" | "exit" => Ok(Outcome::Quit),
            "owner" => {
                if args.is_empty() {
                    bail!("usage: owner <name>");
                }
                self.owner.rename(args);
                reply(format!("Owner is now {args}."))
            }
            "window" => {
                let hours: Vec<i32> = args
                    .split_whitespace()
                    .map(|h| h.parse::<i32>().with_context(|| format!("bad hour '{h}'")))
                    .collect::<Result<_>>()?;
                let &[start, end] = hours.as_slice() else {
                    bail!("usage: window <start> <end>");
                };
                self.owner.set_availability(start, end);
                reply(format!(
                    "Available {start:02}:00 - {end:02}:00 ({} minutes).",
                    self.owner.capacity_minutes()
                ))
            }
            "pets" => {
                if self.owner.pets().is_empty() {
                    return reply("No pets yet.");
                }
                let lines: Vec<String> = self
                    .owner
                    .pets()
                    .iter()
                    .map(|p| {
                        let info = p.info();
                        format!(
                            "- {} ({}) - {} task(s), {} open",
                            info.name, info.species, info.task_count, info.pending_count
                        )
                    })
                    .collect();
                reply(lines.join("\n"))
            }
            "pet" => self.handle_pet(args),
            "task" => self.handle_task(args),
            "tasks" => self.handle_tasks(args),
            "plan" => {
                self.scheduler.generate_schedule(&mut self.owner);
                reply(render_plan_report(&self.owner, &self.scheduler))
            }
            "explain" => reply(self.scheduler.explain_plan()),
            "conflicts" => {
                if self.scheduler.conflicts().is_empty() {
                    return reply("No conflicts.");
                }
                reply(self.scheduler.conflicts().join("\n"))
            }
            other => bail!("unknown command '{other}' (try 'help')"),
        }
    }

    fn handle_pet(&mut self, args: &str) -> Result<Outcome> {
        let mut parts = args.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some("add"), Some(name), species) => {
                if self.owner.pet(name).is_some() {
                    bail!("a pet named '{name}' already exists");
                }
                let species = species.unwrap_or("other");
                self.owner.add_pet(Pet::new(name, species, self.owner.name.clone()));
                reply(format!("Added {name} ({species})."))
            }
            (Some("remove"), Some(name), None) => match self.owner.remove_pet(name) {
                Some(pet) => reply(format!("Removed {} and {} task(s).", pet.name, pet.tasks().len())),
                None => bail!("no pet named '{name}'"),
            },
            _ => bail!("usage: pet add <name> [species] | pet remove <name>"),
        }
    }

    fn handle_task(&mut self, args: &str) -> Result<Outcome> {
        let (action, rest) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
        let (pet_name, rest) = pet_and_rest(rest)?;

        match action {
            "add" => {
                let Some(record) = parse_task_line(rest)? else {
                    bail!("usage: task add <pet>: <title> | <minutes> | <priority> [| <type> [| <frequency>]]");
                };
                let task = record.to_task()?;
                let title = task.title.clone();
                self.pet_mut(pet_name)?.add_task(task);
                reply(format!("Added '{title}' for {pet_name}."))
            }
            "done" => {
                if !self.pet_mut(pet_name)?.mark_task_complete(rest) {
                    bail!("no task '{rest}' for {pet_name}");
                }
                reply(format!("Completed '{rest}'."))
            }
            "undo" => {
                if !self.pet_mut(pet_name)?.mark_task_incomplete(rest) {
                    bail!("no task '{rest}' for {pet_name}");
                }
                reply(format!("Reopened '{rest}'."))
            }
            "remove" => match self.pet_mut(pet_name)?.remove_task(rest) {
                Some(t) => reply(format!("Removed '{}'.", t.title)),
                None => bail!("no task '{rest}' for {pet_name}"),
            },
            _ => bail!("usage: task add|done|undo|remove <pet>: ..."),
        }
    }

    fn handle_tasks(&mut self, args: &str) -> Result<Outcome> {
        let mut completed = None;
        let mut pet = None;
        for word in args.split_whitespace() {
            match word {
                "pending" => completed = Some(false),
                "done" => completed = Some(true),
                name => pet = Some(name),
            }
        }
        let all = self.owner.all_tasks();
        let filtered = filter_tasks(&self.owner, all.iter().copied(), completed, pet);
        let sorted = sort_by_time(filtered);
        reply(render_task_list(&self.owner, &sorted))
    }
}

/// Read commands from stdin until `quit` or EOF.
pub fn run_session(mut state: AppState) -> Result<()> {
    println!("PawPal session for {} (type 'help')", state.owner.name);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("pawpal> ");
        io::stdout().flush().ok();

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("read stdin")?;

        match state.handle(&line) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Reply(text)) => {
                if !text.is_empty() {
                    println!("{}", text.trim_end());
                }
            }
            Err(err) => println!("error: {err:#}"),
        }
    }

    Ok(())
}
