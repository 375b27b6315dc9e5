
extern crate yk_regex_combinations;

mod str_gen;

use yk_regex_combinations::Combinations;
use str_gen::*;

const USAGE: &str = "usage: yk_regex_fuzzer <pattern> [--from N] [--count N] [--stride N]";

#[derive(Debug, PartialEq, Eq)]
struct Args {
    pattern: String,
    from: u64,
    count: u64,
    stride: Option<u64>,
}

fn parse_args<I>(args: I) -> Result<Args, String> where I : IntoIterator<Item = String> {
    let mut pattern = None;
    let mut from = 0;
    let mut count = 10;
    let mut stride = None;

    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--from" => from = parse_number(&arg, it.next())?,
            "--count" => count = parse_number(&arg, it.next())?,
            "--stride" => stride = Some(parse_number(&arg, it.next())?),
            _ if pattern.is_none() => pattern = Some(arg),
            _ => return Err(format!("unexpected argument '{}'", arg)),
        }
    }

    match pattern {
        Some(pattern) => Ok(Args{ pattern, from, count, stride }),
        None => Err("missing pattern".into()),
    }
}

fn parse_number(flag: &str, value: Option<String>) -> Result<u64, String> {
    let value = value.ok_or_else(|| format!("missing value for {}", flag))?;
    value.parse().map_err(|_| format!("invalid value '{}' for {}", value, flag))
}

fn generator<'a>(combinations: &'a Combinations, args: &Args) -> Box<dyn StringGenStrategy + 'a> {
    match args.stride {
        Some(stride) => Box::new(StridedGenerator::with_stride(combinations, args.from, stride)),
        None => Box::new(SequentialGenerator::starting_at(combinations, args.from)),
    }
}

fn main() {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        },
    };

    let combinations = match Combinations::new(&args.pattern) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        },
    };

    println!("size: {}", combinations.size());
    let mut gen = generator(&combinations, &args);
    for _ in 0..args.count {
        match gen.generate() {
            Some((index, s)) => println!("{}\t{}", index, s),
            None => break,
        }
    }
}
