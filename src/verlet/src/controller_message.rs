// Input boundary: the windowing side translates raw cursor and button
// events into these and sends them over the channel between frames.
pub enum ControllerMessage {
	PointerMove(f32, f32),
	PrimaryPress(f32, f32),
	PrimaryRelease,
	SecondaryPress(f32, f32),
	SecondaryRelease,
	TogglePause,
	FrameForward,
}
