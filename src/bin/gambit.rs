// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use std::process;
use std::time::Instant;

use clap::{App, Arg, ArgMatches, SubCommand};
use gambit::{divide, perft, random_playout, Coord, GameRecord, Position};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn moves_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("MOVES")
        .help("Moves to play from the starting position, as square pairs like e2e4")
        .multiple(true)
        .index(1)
}

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .subcommand(
            SubCommand::with_name("show")
                .about("Plays a sequence of moves and prints the resulting board")
                .arg(
                    Arg::with_name("json")
                        .help("Print the game as JSON instead of a diagram")
                        .long("--json"),
                )
                .arg(moves_arg()),
        )
        .subcommand(
            SubCommand::with_name("moves")
                .about("Lists the legal moves after a sequence of moves")
                .arg(moves_arg()),
        )
        .subcommand(
            SubCommand::with_name("perft")
                .about("Counts move paths after a sequence of moves")
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to search")
                        .value_name("DEPTH")
                        .short("-d")
                        .long("--depth")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("divide")
                        .help("Print the count below each root move at the given depth")
                        .long("--divide"),
                )
                .arg(moves_arg()),
        )
        .subcommand(
            SubCommand::with_name("playout")
                .about("Plays random legal moves from the starting position")
                .arg(
                    Arg::with_name("plies")
                        .help("Maximum number of moves to play")
                        .value_name("PLIES")
                        .short("-p")
                        .long("--plies")
                        .takes_value(true)
                        .default_value("40"),
                )
                .arg(
                    Arg::with_name("seed")
                        .help("Seed for the random number generator")
                        .value_name("SEED")
                        .short("-s")
                        .long("--seed")
                        .takes_value(true),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("show", Some(matches)) => run_show(matches),
        ("moves", Some(matches)) => run_moves(matches),
        ("perft", Some(matches)) => run_perft(matches),
        ("playout", Some(matches)) => run_playout(matches),
        _ => {
            println!("{}", matches.usage());
            process::exit(1);
        }
    }
}

fn parse_move(text: &str) -> Result<(Coord, Coord), String> {
    if text.len() != 4 || !text.is_ascii() {
        return Err(format!("\"{}\" is not a move like e2e4", text));
    }

    let from = text[..2].parse::<Coord>().map_err(|e| e.to_string())?;
    let to = text[2..].parse::<Coord>().map_err(|e| e.to_string())?;
    Ok((from, to))
}

fn play_moves(matches: &ArgMatches) -> Position {
    let mut pos = Position::new_game();
    let moves = matches.values_of("MOVES").into_iter().flatten();
    for (i, text) in moves.enumerate() {
        let (from, to) = match parse_move(text) {
            Ok(squares) => squares,
            Err(msg) => {
                println!("{}", msg);
                process::exit(1);
            }
        };

        let mov = pos.classify(from, to);
        pos = match pos.try_move(mov) {
            Ok(next) => next,
            Err(err) => {
                println!("move {} ({}) rejected: {}", i + 1, text, err);
                process::exit(1);
            }
        };
        debug!("played {}", mov);
    }

    pos
}

fn run_show(matches: &ArgMatches) -> ! {
    let pos = play_moves(matches);
    if matches.is_present("json") {
        match GameRecord::from(&pos).to_json() {
            Ok(json) => println!("{}", json),
            Err(err) => {
                println!("failed to serialize game: {}", err);
                process::exit(1);
            }
        }
        process::exit(0);
    }

    println!("{}", pos);
    println!();
    println!("{} to move, {} legal moves", pos.turn(), pos.legal_moves().len());
    process::exit(0);
}

fn run_moves(matches: &ArgMatches) -> ! {
    let pos = play_moves(matches);
    for mov in pos.legal_moves() {
        println!("{}", mov);
    }

    process::exit(0);
}

fn run_perft(matches: &ArgMatches) -> ! {
    let depth = value_t_or_exit!(matches, "depth", u32);
    let pos = play_moves(matches);
    println!("depth: {}", depth);
    println!();
    println!("{}", pos);
    println!();

    if matches.is_present("divide") {
        let split = divide(&pos, depth);
        for &(mov, count) in &split {
            println!("{}: {}", mov, count);
        }

        println!();
        println!("total: {}", split.iter().map(|&(_, count)| count).sum::<u64>());
        process::exit(0);
    }

    for i in 1..depth + 1 {
        let start = Instant::now();
        let results = perft(&pos, i);
        let duration = start.elapsed();
        println!("perft({}) = {} ({} ms)", i, results, duration.as_millis());
    }

    process::exit(0);
}

fn run_playout(matches: &ArgMatches) -> ! {
    let plies = value_t_or_exit!(matches, "plies", usize);
    let mut rng = if matches.is_present("seed") {
        StdRng::seed_from_u64(value_t_or_exit!(matches, "seed", u64))
    } else {
        StdRng::from_entropy()
    };

    let pos = random_playout(&Position::new_game(), plies, &mut rng);
    info!("playout finished after {} plies", pos.history().len());
    println!("{}", pos);
    println!();
    println!("{} plies played, {} to move", pos.history().len(), pos.turn());
    process::exit(0);
}
