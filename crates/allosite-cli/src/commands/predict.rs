use crate::cli::Cli;
use allosite_core::AllositePredictor;

pub fn execute(args: &Cli) -> anyhow::Result<()> {
    let predictor = AllositePredictor::new(&args.weights, &args.labels, &args.reference)?;
    let prediction = predictor.predict(&args.structure)?;

    println!("\nPrediction Results:");
    println!(
        "Most likely allosteric binding site: Pocket {}",
        prediction.pocket.index
    );
    println!("Confidence score: {:.4}", prediction.pocket.confidence);
    println!(
        "Pocket center: {:.3} {:.3} {:.3}",
        prediction.center[0], prediction.center[1], prediction.center[2]
    );
    Ok(())
}
