//! Console rendering of learned networks and classification results.

use crate::error::BayesError;
use crate::inference::ClassificationReport;
use crate::network::{BayesianNetwork, NodeId};

/// Prints every node in order with its children.
pub fn print_topology(network: &BayesianNetwork) -> Result<(), BayesError> {
    print_green!("Topology ({} nodes, {} edges):", network.len(), network.edges().len());
    for &id in network.order() {
        let node = network.node(id)?;
        let children = node
            .children()
            .iter()
            .map(|&c| network.node(c).map(|n| n.name().to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        if children.is_empty() {
            println!("  {} ({} states)", node.name(), node.states());
        } else {
            println!("  {} ({} states) -> {}", node.name(), node.states(), children.join(", "));
        }
    }
    Ok(())
}

/// Prints each node's CPD, one line per parent-state combination.
pub fn print_cpds(network: &BayesianNetwork) -> Result<(), BayesError> {
    for &id in network.order() {
        let node = network.node(id)?;
        print_blue!("P({} | {})", node.name(), parent_names(network, id)?.join(", "));
        for (assignment, density) in network.cpd_rows(id)? {
            let condition = assignment
                .iter()
                .map(|&(parent, state)| network.node(parent).map(|p| format!("{}={}", p.name(), state)))
                .collect::<Result<Vec<_>, _>>()?;
            let values: Vec<String> = density.probabilities().iter().map(|p| format!("{:.3}", p)).collect();
            println!("  [{}] {}", condition.join(", "), values.join(" "));
        }
    }
    Ok(())
}

fn parent_names(network: &BayesianNetwork, id: NodeId) -> Result<Vec<String>, BayesError> {
    network
        .node(id)?
        .parents()
        .iter()
        .map(|&p| network.node(p).map(|n| n.name().to_string()))
        .collect()
}

pub fn print_classification(report: &ClassificationReport) {
    print_green!("Confusion matrix (rows: actual, columns: predicted):");
    for row in &report.confusion {
        let cells: Vec<String> = row.iter().map(|c| format!("{:>5}", c)).collect();
        println!("  {}", cells.join(""));
    }
    let recall: Vec<String> = report.recall().iter().map(|r| format!("{:.3}", r)).collect();
    println!("Recall per class: {}", recall.join(" "));
    println!("Accuracy: {:.3}", report.accuracy());
    if report.unclassified > 0 {
        print_yellow!("{} observations had no consistent samples", report.unclassified);
    }
}
