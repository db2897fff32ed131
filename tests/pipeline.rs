use std::cell::RefCell;
use std::rc::Rc;

use path_graph_canvas::graph::{
	Bounds, ClickOutcome, DrawCommand, Notice, PetgraphOracle, Session, SimulationScheduler, Theme,
	parse_graph, render, solve_path,
};

const ROAD_MAP: &str = "\
5
A, 0, 0
B, 100, 0
C, 200, 0
D, 300, 0
E, 150, 150
5
A, B, 1
B, C, 1
C, D, 1
A, E, 2
E, D, 2
";

fn highlighted_edges(commands: &[DrawCommand], theme: &Theme) -> usize {
	commands
		.iter()
		.filter(|c| matches!(c, DrawCommand::Line { color, .. } if *color == theme.highlight))
		.count()
}

fn highlighted_nodes(commands: &[DrawCommand], theme: &Theme) -> Vec<usize> {
	commands
		.iter()
		.filter_map(|c| match c {
			DrawCommand::Circle { node, color, .. } if *color == theme.highlight => Some(*node),
			_ => None,
		})
		.collect()
}

#[test]
fn upload_select_solve_and_render() {
	let mut session = Session::default();
	session.load(parse_graph(ROAD_MAP).unwrap());

	assert_eq!(session.click("A"), Ok(ClickOutcome::Selected));
	assert_eq!(session.click("D"), Ok(ClickOutcome::Selected));
	let outcome = session.click("E").unwrap();
	assert_eq!(outcome.notice(), Some(Notice::SelectionLimit));

	let request = session.path_request().unwrap();
	let graph = session.graph().unwrap().clone();
	let path = solve_path(&PetgraphOracle::new(&graph), &graph, &request.start, &request.end).unwrap();
	assert_eq!(path.vertices(), ["A", "B", "C", "D"]);
	assert!(session.apply_path(&request, path));

	let bounds = Bounds::new(800.0, 600.0);
	let theme = Theme::default();
	let mut scheduler = SimulationScheduler::default();
	let handle = scheduler.start(&graph, bounds);

	let drawn = Rc::new(RefCell::new(Vec::new()));
	let sink = drawn.clone();
	let (selection, path) = (session.selection().clone(), session.path().clone());
	let (g, t) = (graph.clone(), theme.clone());
	scheduler
		.on_tick(handle, move |frame| {
			*sink.borrow_mut() = render(&g, frame, &selection, &path, bounds, &t);
		})
		.unwrap();
	scheduler.step();

	let commands = drawn.borrow();
	assert_eq!(highlighted_edges(&commands, &theme), 3);
	assert_eq!(highlighted_nodes(&commands, &theme), [0, 1, 2, 3]);
}

#[test]
fn deselecting_clears_the_highlight() {
	let mut session = Session::default();
	session.load(parse_graph(ROAD_MAP).unwrap());
	session.click("A").unwrap();
	session.click("D").unwrap();

	let request = session.path_request().unwrap();
	let graph = session.graph().unwrap().clone();
	let path = solve_path(&PetgraphOracle::new(&graph), &graph, &request.start, &request.end).unwrap();
	session.apply_path(&request, path);
	session.click("D").unwrap();

	let theme = Theme::default();
	let mut scheduler = SimulationScheduler::default();
	let handle = scheduler.start(&graph, Bounds::new(800.0, 600.0));
	let frame = scheduler.frame(handle).unwrap();
	let commands = render(
		&graph,
		&frame,
		session.selection(),
		session.path(),
		Bounds::new(800.0, 600.0),
		&theme,
	);
	assert_eq!(highlighted_edges(&commands, &theme), 0);
	assert_eq!(highlighted_nodes(&commands, &theme), [0]);
}

fn upload(session: &mut Session, text: &str) -> Option<Notice> {
	match parse_graph(text) {
		Ok(graph) => {
			session.load(graph);
			None
		}
		Err(e) => Some(Notice::ParseFailed(e.to_string())),
	}
}

#[test]
fn unreachable_target_renders_without_highlight() {
	let mut session = Session::default();
	session.load(parse_graph(ROAD_MAP).unwrap());
	session.click("D").unwrap();
	session.click("A").unwrap();

	let request = session.path_request().unwrap();
	let graph = session.graph().unwrap().clone();
	let path = solve_path(&PetgraphOracle::new(&graph), &graph, &request.start, &request.end).unwrap();
	assert!(path.is_empty());
	assert!(session.apply_path(&request, path));

	let bounds = Bounds::new(800.0, 600.0);
	let theme = Theme::default();
	let mut scheduler = SimulationScheduler::default();
	let handle = scheduler.start(&graph, bounds);
	let frame = scheduler.frame(handle).unwrap();
	let commands = render(&graph, &frame, session.selection(), session.path(), bounds, &theme);
	assert_eq!(highlighted_edges(&commands, &theme), 0);
	assert_eq!(highlighted_nodes(&commands, &theme), [0, 3]);
}

#[test]
fn bad_upload_leaves_previous_graph_alone() {
	let mut session = Session::default();
	assert_eq!(upload(&mut session, ROAD_MAP), None);
	session.click("A").unwrap();
	let generation = session.generation();

	let notice = upload(&mut session, "3\nA,0,0\nB,1,1\n").unwrap();
	assert!(notice.to_string().contains("Not enough node data"));
	assert_eq!(session.generation(), generation);
	assert_eq!(session.graph().unwrap().nodes().len(), 5);
	assert_eq!(session.selection().ids(), ["A"]);

	let notice = upload(&mut session, "2\nA,0,0\nB,1,1\n1\nA,Z,1\n").unwrap();
	assert!(notice.to_string().contains("unknown node 'Z'"));
	assert_eq!(session.generation(), generation);
	assert_eq!(session.selection().ids(), ["A"]);
}
