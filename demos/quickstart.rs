// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use datekit::{Calculator, Config, Converter, EpochMillis, FormatError, Locale, TimeUnit, Zone};

fn main() -> Result<(), FormatError> {
    let config = Config::new()
        .with_zone(Zone::utc())
        .with_pattern("yyyy-MM-dd HH:mm")?;
    let conv = Converter::new(config.clone());
    let calc = Calculator::new(config);

    let now = conv.now();
    println!("now:            {}", now);
    println!("epoch millis:   {:?}", conv.to_epoch_millis(now)?);
    println!("epoch seconds:  {:?}", conv.to_epoch_seconds(now)?);
    println!("text:           {:?}", conv.to_text(now)?);
    println!(
        "fr_BE:          {:?}",
        conv.to_text_with(now, "EEEE d MMMM yyyy", Locale::fr_BE)?
    );

    let start = "2020-01-31 08:00";
    let end = EpochMillis(1_583_071_200_000); // 2020-03-01T14:00Z
    println!("compare:        {:?}", calc.compare(start, end)?);
    if let Some(breakdown) = calc.breakdown(start, end)? {
        println!("breakdown:      {breakdown} ({:.3} days)", breakdown.as_days().value());
    }
    if let Some(period) = calc.period(start, end)? {
        println!("period:         {period}");
    }
    println!(
        "months:         {:?} (total {:?})",
        calc.duration_in(TimeUnit::Months, start, end)?,
        calc.total_duration_in(TimeUnit::Months, start, end)?
    );
    println!("absent operand: {:?}", calc.compare(start, None::<EpochMillis>)?);
    Ok(())
}
